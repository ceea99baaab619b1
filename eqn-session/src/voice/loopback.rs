//! An audio input and recognizer that pass text through as "audio", for driving the voice path
//! without a microphone or speech model.

use super::{parse_final_result, AudioInput, FrameSink, RecognitionStream, Recognizer, VoiceError};
use crate::config::VoiceSettings;
use serde_json::json;

/// Plays back a fixed utterance, split into blocks, then closes the stream.
#[derive(Debug, Clone, Default)]
pub struct LoopbackInput {
    audio: Vec<u8>,
}

impl LoopbackInput {
    /// Creates an input that "says" the given words.
    pub fn saying(words: &str) -> Self {
        Self { audio: words.as_bytes().to_vec() }
    }
}

impl AudioInput for LoopbackInput {
    fn start(&mut self, settings: &VoiceSettings, sink: FrameSink) -> Result<(), VoiceError> {
        for block in self.audio.chunks(settings.block_bytes().max(1)) {
            if !sink.push(block.to_vec()) {
                return Err(VoiceError::Input("listening stopped during playback".to_string()));
            }
        }
        Ok(())
    }

    fn stop(&mut self) {}
}

/// Transcribes loopback audio back into text, reporting it the way streaming recognizers do, as a
/// `{"text": ...}` final result.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopbackRecognizer;

impl Recognizer for LoopbackRecognizer {
    fn begin(&self, sample_rate: u32, channels: u16) -> Result<Box<dyn RecognitionStream>, VoiceError> {
        if sample_rate == 0 || channels == 0 {
            return Err(VoiceError::Recognizer(format!(
                "unsupported format: {} Hz, {} channel(s)",
                sample_rate,
                channels,
            )));
        }
        Ok(Box::new(LoopbackStream::default()))
    }
}

#[derive(Debug, Default)]
struct LoopbackStream {
    audio: Vec<u8>,
}

impl LoopbackStream {
    fn final_result(&self) -> String {
        let text = String::from_utf8_lossy(&self.audio);
        json!({ "text": text.trim() }).to_string()
    }
}

impl RecognitionStream for LoopbackStream {
    fn feed(&mut self, frame: &[u8]) {
        self.audio.extend_from_slice(frame);
    }

    fn finalize(&mut self) -> Result<String, VoiceError> {
        let result = self.final_result();
        self.audio.clear();
        parse_final_result(&result)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn stream_round_trips_text() {
        let mut stream = LoopbackRecognizer.begin(16_000, 1).unwrap();
        stream.feed(b"divide by ");
        stream.feed(b"two ");
        assert_eq!(stream.finalize().unwrap(), "divide by two");
        assert_eq!(stream.finalize().unwrap(), "");
    }

    #[test]
    fn rejects_empty_format() {
        assert!(LoopbackRecognizer.begin(0, 1).is_err());
    }
}
