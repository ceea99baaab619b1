//! Voice capture: an audio input pushes frames onto a queue while the user is listening, and a
//! worker thread feeds them to a streaming recognizer. When listening stops, the worker finalizes
//! the recognizer and submits the transcript to the [`Session`] as a single command.
//!
//! The audio input runs on its own real-time thread and must never block, so frames are pushed
//! onto an unbounded channel. The worker polls that channel with a timeout of
//! [`VoiceSettings::poll_interval`], which bounds how long it takes to notice that listening has
//! stopped.

pub mod loopback;

use crate::{config::VoiceSettings, session::Session};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};
use serde::Deserialize;
use std::{
    io,
    sync::{atomic::{AtomicBool, Ordering}, Arc},
    thread::{self, JoinHandle},
};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("audio input failed: {0}")]
    Input(String),

    #[error("speech recognizer failed: {0}")]
    Recognizer(String),

    #[error("malformed recognizer result: {0}")]
    MalformedResult(#[from] serde_json::Error),

    #[error("could not start the voice worker: {0}")]
    Spawn(#[from] io::Error),

    #[error("the voice worker panicked")]
    WorkerPanicked,
}

/// The producing half of the frame queue, handed to an [`AudioInput`].
///
/// Frames are only queued while listening. Pushing never blocks and never allocates: the frame
/// buffer is moved onto the queue as is.
#[derive(Debug, Clone)]
pub struct FrameSink {
    frames: Sender<Vec<u8>>,
    listening: Arc<AtomicBool>,
}

impl FrameSink {
    /// Queues a frame of raw audio. Returns false if the frame was dropped because listening has
    /// stopped.
    pub fn push(&self, frame: Vec<u8>) -> bool {
        if !self.listening.load(Ordering::Acquire) {
            return false;
        }

        match self.frames.try_send(frame) {
            Ok(()) => true,
            Err(TrySendError::Full(_) | TrySendError::Disconnected(_)) => false,
        }
    }
}

/// A source of raw audio, such as a microphone.
pub trait AudioInput: Send {
    /// Starts delivering blocks of 16-bit little-endian samples to `sink`, in the format given by
    /// `settings`.
    fn start(&mut self, settings: &VoiceSettings, sink: FrameSink) -> Result<(), VoiceError>;

    /// Stops delivering audio.
    fn stop(&mut self);
}

/// One utterance being recognized.
pub trait RecognitionStream: Send {
    /// Feeds the next block of raw audio.
    fn feed(&mut self, frame: &[u8]);

    /// Finishes recognition and returns the transcript.
    fn finalize(&mut self) -> Result<String, VoiceError>;
}

/// A streaming speech-to-text engine.
pub trait Recognizer: Send + Sync {
    fn begin(&self, sample_rate: u32, channels: u16) -> Result<Box<dyn RecognitionStream>, VoiceError>;
}

#[derive(Deserialize)]
struct FinalResult {
    #[serde(default)]
    text: String,
}

/// Extracts the transcript from a recognizer's final result, in the form `{"text": "..."}`. A
/// result without a `text` field is the empty transcript.
pub fn parse_final_result(json: &str) -> Result<String, VoiceError> {
    let result: FinalResult = serde_json::from_str(json)?;
    Ok(result.text)
}

/// A voice capture in progress, from the start of listening until [`VoiceSession::stop`].
pub struct VoiceSession {
    listening: Arc<AtomicBool>,
    worker: Option<JoinHandle<Result<String, VoiceError>>>,
}

impl VoiceSession {
    /// Starts listening. Audio from `input` is recognized on a new worker thread, and the
    /// transcript is submitted to `session` once listening stops.
    pub fn start(
        session: Arc<Session>,
        mut input: Box<dyn AudioInput>,
        recognizer: Arc<dyn Recognizer>,
        settings: VoiceSettings,
    ) -> Result<Self, VoiceError> {
        let listening = Arc::new(AtomicBool::new(true));
        let (sender, frames) = crossbeam_channel::unbounded();
        let sink = FrameSink { frames: sender, listening: Arc::clone(&listening) };

        let mut stream = recognizer.begin(settings.sample_rate, settings.channels)?;
        input.start(&settings, sink)?;
        info!(sample_rate = settings.sample_rate, channels = settings.channels, "listening");

        let worker_listening = Arc::clone(&listening);
        let worker = thread::Builder::new()
            .name("voice-worker".to_string())
            .spawn(move || -> Result<String, VoiceError> {
                consume(&frames, stream.as_mut(), &worker_listening, &settings);
                input.stop();
                let transcript = stream.finalize()?;
                info!(%transcript, "transcript finalized");
                session.submit_echoed(&transcript);
                Ok(transcript)
            });

        let worker = match worker {
            Ok(worker) => worker,
            Err(err) => {
                listening.store(false, Ordering::Release);
                return Err(err.into());
            },
        };

        Ok(Self { listening, worker: Some(worker) })
    }

    /// Returns false once listening has stopped, either through [`VoiceSession::stop`] or
    /// because the audio input closed its stream.
    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Acquire)
    }

    /// Stops listening and waits for the worker to submit the transcript, which is returned.
    /// The transcript is echoed to the console before it runs.
    ///
    /// The worker notices within one poll interval.
    pub fn stop(mut self) -> Result<String, VoiceError> {
        self.listening.store(false, Ordering::Release);
        let worker = self.worker.take().ok_or(VoiceError::WorkerPanicked)?;
        worker.join().map_err(|_| VoiceError::WorkerPanicked)?
    }
}

impl Drop for VoiceSession {
    fn drop(&mut self) {
        // the worker still submits whatever it heard
        self.listening.store(false, Ordering::Release);
    }
}

/// Feeds queued frames to the recognizer until listening stops or the input goes away.
fn consume(
    frames: &Receiver<Vec<u8>>,
    stream: &mut dyn RecognitionStream,
    listening: &AtomicBool,
    settings: &VoiceSettings,
) {
    let poll_interval = settings.poll_interval();
    let mut fed = 0usize;

    while listening.load(Ordering::Acquire) {
        match frames.recv_timeout(poll_interval) {
            Ok(frame) => {
                trace!(bytes = frame.len(), "feeding frame");
                stream.feed(&frame);
                fed += 1;
            },
            Err(RecvTimeoutError::Timeout) => (),
            Err(RecvTimeoutError::Disconnected) => {
                debug!("audio input closed");
                listening.store(false, Ordering::Release);
                break;
            },
        }
    }

    // frames queued before listening stopped still belong to this utterance
    for frame in frames.try_iter() {
        stream.feed(&frame);
        fed += 1;
    }

    if fed == 0 {
        warn!("no audio was captured");
    }
    debug!(frames = fed, "stopped listening");
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn final_result_text() {
        assert_eq!(parse_final_result(r#"{"text": "divide by two"}"#).unwrap(), "divide by two");
        assert_eq!(parse_final_result(r#"{"text": ""}"#).unwrap(), "");
    }

    #[test]
    fn final_result_without_text() {
        assert_eq!(parse_final_result(r#"{"result": []}"#).unwrap(), "");
    }

    #[test]
    fn final_result_malformed() {
        assert!(matches!(parse_final_result("not json"), Err(VoiceError::MalformedResult(_))));
    }

    #[test]
    fn sink_drops_frames_when_not_listening() {
        let (sender, frames) = crossbeam_channel::unbounded();
        let listening = Arc::new(AtomicBool::new(true));
        let sink = FrameSink { frames: sender, listening: Arc::clone(&listening) };

        assert!(sink.push(vec![1, 2]));
        listening.store(false, Ordering::Release);
        assert!(!sink.push(vec![3, 4]));
        assert_eq!(frames.try_iter().collect::<Vec<_>>(), vec![vec![1, 2]]);
    }

    #[test]
    fn sink_moves_frame_buffer() {
        let (sender, frames) = crossbeam_channel::unbounded();
        let sink = FrameSink { frames: sender, listening: Arc::new(AtomicBool::new(true)) };

        let frame = vec![0u8; 64];
        let buffer = frame.as_ptr();
        assert!(sink.push(frame));
        assert_eq!(frames.try_recv().unwrap().as_ptr(), buffer);
    }

    #[test]
    fn closed_input_stops_listening() {
        let (sender, frames) = crossbeam_channel::unbounded::<Vec<u8>>();
        sender.send(vec![7]).unwrap();
        drop(sender);

        struct Collect(Vec<u8>);

        impl RecognitionStream for Collect {
            fn feed(&mut self, frame: &[u8]) {
                self.0.extend_from_slice(frame);
            }

            fn finalize(&mut self) -> Result<String, VoiceError> {
                Ok(String::new())
            }
        }

        let listening = AtomicBool::new(true);
        let mut stream = Collect(Vec::new());
        consume(&frames, &mut stream, &listening, &VoiceSettings::default());
        assert_eq!(stream.0, vec![7]);
        assert!(!listening.load(Ordering::Acquire));
    }
}
