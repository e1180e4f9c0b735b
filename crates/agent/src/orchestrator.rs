//! Turn orchestrator
//!
//! Coordinates one interview turn: validate the request, stage temporary
//! media behind RAII guards, fan out to the adapters and the hosted model,
//! and assemble the response payload. Collaborators are injected as trait
//! objects so every one of them can be faked in tests.

use std::path::Path;
use std::sync::Arc;

use ai_interviewer_core::{
    Error, InterviewModel, InterviewStart, InterviewTurn, MediaConverter, Result, SpeechToText,
    TextToSpeech,
};

use crate::transcript;

/// Sequences the two interview operations over injected collaborators.
///
/// Holds no conversational state: continuity travels in the transcript the
/// caller round-trips, so one orchestrator serves concurrent requests.
pub struct TurnOrchestrator {
    model: Arc<dyn InterviewModel>,
    converter: Arc<dyn MediaConverter>,
    stt: Arc<dyn SpeechToText>,
    tts: Arc<dyn TextToSpeech>,
}

impl TurnOrchestrator {
    pub fn new(
        model: Arc<dyn InterviewModel>,
        converter: Arc<dyn MediaConverter>,
        stt: Arc<dyn SpeechToText>,
        tts: Arc<dyn TextToSpeech>,
    ) -> Self {
        Self {
            model,
            converter,
            stt,
            tts,
        }
    }

    /// Start an interview from an uploaded resume and a job description.
    ///
    /// Returns the model's opening transcript, the first question (last
    /// transcript line), and the synthesized question audio.
    pub async fn start_interview(
        &self,
        resume_name: &str,
        resume: &[u8],
        job_description: &str,
    ) -> Result<InterviewStart> {
        if resume.is_empty() {
            return Err(Error::InvalidRequest("resume file is empty".to_string()));
        }
        if job_description.trim().is_empty() {
            return Err(Error::InvalidRequest(
                "job description is required".to_string(),
            ));
        }

        // Stage the resume for the model client. The guard unlinks the file
        // on every exit path below, success or failure.
        let suffix = resume_suffix(resume_name);
        let resume_file = tempfile::Builder::new()
            .prefix("resume_")
            .suffix(&suffix)
            .tempfile()?;
        tokio::fs::write(resume_file.path(), resume).await?;

        let conversation = self
            .model
            .begin_interview(resume_file.path(), job_description)
            .await?;

        let first_question = transcript::first_question(&conversation);
        let audio = self.tts.synthesize(&first_question, "question_0").await?;

        tracing::info!(first_question = %first_question, "interview started");
        Ok(InterviewStart {
            conversation,
            first_question,
            audio,
        })
    }

    /// Process one recorded candidate response and produce the next
    /// interviewer reply.
    pub async fn process_response(
        &self,
        audio: &[u8],
        format_hint: Option<&str>,
        history: &str,
    ) -> Result<InterviewTurn> {
        if audio.is_empty() {
            return Err(Error::InvalidRequest("audio recording is empty".to_string()));
        }
        if history.trim().is_empty() {
            return Err(Error::InvalidRequest(
                "conversation history is required".to_string(),
            ));
        }

        let wav = self.converter.to_canonical_wav(audio, format_hint).await?;

        // Degraded success: a failed transcription becomes a placeholder
        // utterance and the interview continues. One bad audio sample must
        // not abort the whole interview.
        let transcription = match self.stt.transcribe(&wav).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(error = %err, "transcription degraded to placeholder");
                err.placeholder().to_string()
            }
        };

        let full_response = self.model.continue_interview(&transcription).await?;
        let reply = transcript::extract_reply(&full_response, &transcription);
        let audio_ref = self.tts.synthesize(&reply, "question").await?;
        let conversation = transcript::append_exchange(history, &transcription, &reply);

        tracing::info!(
            transcription = %transcription.chars().take(80).collect::<String>(),
            "interview turn completed"
        );
        Ok(InterviewTurn {
            transcription,
            ai_response: reply,
            conversation,
            audio: audio_ref,
        })
    }
}

/// Keep the upload's extension so the model client can name the document
/// sensibly; default to .pdf like the uploads we actually receive.
fn resume_suffix(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_else(|| ".pdf".to_string())
}
