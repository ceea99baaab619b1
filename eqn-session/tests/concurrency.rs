mod common;

use common::Recorder;
use eqn_session::{
    config::VoiceSettings,
    voice::{
        loopback::{LoopbackInput, LoopbackRecognizer},
        AudioInput,
        FrameSink,
        VoiceError,
    },
    Session,
    VoiceSession,
};
use pretty_assertions::assert_eq;
use std::{
    sync::{Arc, Barrier, Mutex},
    thread,
    time::{Duration, Instant},
};

fn settings() -> VoiceSettings {
    VoiceSettings { poll_interval_ms: 10, ..VoiceSettings::default() }
}

/// Keeps the frame sink open so that the voice session only ends when stopped.
#[derive(Clone, Default)]
struct HeldInput {
    sink: Arc<Mutex<Option<FrameSink>>>,
}

impl HeldInput {
    fn say(&self, words: &str) -> bool {
        match self.sink.lock().unwrap().as_ref() {
            Some(sink) => sink.push(words.as_bytes().to_vec()),
            None => false,
        }
    }
}

impl AudioInput for HeldInput {
    fn start(&mut self, _: &VoiceSettings, sink: FrameSink) -> Result<(), VoiceError> {
        *self.sink.lock().unwrap() = Some(sink);
        Ok(())
    }

    fn stop(&mut self) {
        self.sink.lock().unwrap().take();
    }
}

#[test]
fn text_submissions_do_not_interleave() {
    for _ in 0..20 {
        let recorder = Recorder::default();
        let session = Arc::new(recorder.builder().equation("2x = 4").build().unwrap());
        let barrier = Arc::new(Barrier::new(2));

        let handles = ["divide by 2", "bogus"].map(|command| {
            let session = Arc::clone(&session);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                session.submit_echoed(command);
            })
        });
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(session.equation().to_string(), "2x/2 = 4/2");

        // the error line always directly follows its own command
        let lines = recorder.lines();
        let expected = if lines[0] == "> bogus" {
            vec!["> bogus", "> Unrecognized command!", "> divide by 2"]
        } else {
            vec!["> divide by 2", "> bogus", "> Unrecognized command!"]
        };
        assert_eq!(lines, expected);
    }
}

#[test]
fn last_commit_wins() {
    for _ in 0..20 {
        let recorder = Recorder::default();
        let session = Arc::new(recorder.builder().equation("2x = 4").build().unwrap());
        let barrier = Arc::new(Barrier::new(2));

        let handles = ["set y = 1;", "divide by 2 on left"].map(|command| {
            let session = Arc::clone(&session);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                session.submit_echoed(command);
            })
        });
        for handle in handles {
            handle.join().unwrap();
        }

        // either order is a complete application of both commands
        let result = session.equation().to_string();
        if recorder.lines()[0] == "> set y = 1;" {
            assert_eq!(result, "y/2 = 1");
        } else {
            assert_eq!(result, "y = 1");
        }
        assert_eq!(recorder.renders().len(), 2);
    }
}

#[test]
fn voice_transcript_is_submitted_on_stop() {
    let recorder = Recorder::default();
    let session = Arc::new(recorder.builder().equation("2x = 4").build().unwrap());
    let input = HeldInput::default();

    let voice = VoiceSession::start(
        Arc::clone(&session),
        Box::new(input.clone()),
        Arc::new(LoopbackRecognizer),
        settings(),
    ).unwrap();
    assert!(voice.is_listening());
    assert!(input.say("divide by "));
    assert!(input.say("2 on left"));

    // nothing is submitted while listening
    thread::sleep(Duration::from_millis(30));
    assert!(recorder.lines().is_empty());

    let transcript = voice.stop().unwrap();
    assert_eq!(transcript, "divide by 2 on left");
    assert_eq!(session.equation().to_string(), "2x/2 = 4");
    assert_eq!(recorder.lines(), vec!["> divide by 2 on left"]);

    // the input was stopped, so later audio goes nowhere
    assert!(!input.say("simplify"));
}

#[test]
fn stop_is_bounded_by_poll_interval() {
    let recorder = Recorder::default();
    let session = Arc::new(recorder.builder().build().unwrap());
    let voice = VoiceSession::start(
        session,
        Box::new(HeldInput::default()),
        Arc::new(LoopbackRecognizer),
        settings(),
    ).unwrap();

    thread::sleep(Duration::from_millis(25));
    let stopped = Instant::now();
    assert_eq!(voice.stop().unwrap(), "");
    assert!(stopped.elapsed() < Duration::from_secs(1));

    // an empty transcript is still a command
    assert_eq!(recorder.lines(), vec!["> ", "> Unrecognized command!"]);
}

#[test]
fn loopback_voice_session() {
    let recorder = Recorder::default();
    let session = Arc::new(recorder.builder().equation("x + 3 = y + 3").build().unwrap());
    let voice = VoiceSession::start(
        Arc::clone(&session),
        Box::new(LoopbackInput::saying("simplify")),
        Arc::new(LoopbackRecognizer),
        settings(),
    ).unwrap();

    assert_eq!(voice.stop().unwrap(), "simplify");
    assert_eq!(session.equation().to_string(), "x = y");
}

#[test]
fn closed_input_ends_listening() {
    let recorder = Recorder::default();
    let session = Arc::new(recorder.builder().equation("2x = 4").build().unwrap());
    let voice = VoiceSession::start(
        Arc::clone(&session),
        Box::new(LoopbackInput::saying("divide by 2")),
        Arc::new(LoopbackRecognizer),
        settings(),
    ).unwrap();

    // playback drops its sink when done, which closes the stream
    let deadline = Instant::now() + Duration::from_secs(1);
    while voice.is_listening() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
    assert!(!voice.is_listening());

    assert_eq!(voice.stop().unwrap(), "divide by 2");
    assert_eq!(recorder.lines(), vec!["> divide by 2"]);
    assert_eq!(session.equation().to_string(), "2x/2 = 4/2");
}

#[test]
fn voice_and_text_submissions_serialize() {
    for _ in 0..10 {
        let recorder = Recorder::default();
        let session = Arc::new(recorder.builder().equation("2x = 4").build().unwrap());
        let input = HeldInput::default();
        let voice = VoiceSession::start(
            Arc::clone(&session),
            Box::new(input.clone()),
            Arc::new(LoopbackRecognizer),
            settings(),
        ).unwrap();
        assert!(input.say("bogus"));

        let text = {
            let session = Arc::clone(&session);
            thread::spawn(move || session.submit_echoed("divide by 2"))
        };
        voice.stop().unwrap();
        text.join().unwrap();

        let lines = recorder.lines();
        assert_eq!(lines.len(), 3);
        let error_at = lines.iter().position(|line| line == "> Unrecognized command!").unwrap();
        assert_eq!(lines[error_at - 1], "> bogus");
        assert_eq!(session.equation().to_string(), "2x/2 = 4/2");
    }
}

#[test]
fn input_failure_is_reported() {
    struct BrokenInput;

    impl AudioInput for BrokenInput {
        fn start(&mut self, _: &VoiceSettings, _: FrameSink) -> Result<(), VoiceError> {
            Err(VoiceError::Input("no microphone".to_string()))
        }

        fn stop(&mut self) {}
    }

    let recorder = Recorder::default();
    let session: Arc<Session> = Arc::new(recorder.builder().build().unwrap());
    let result = VoiceSession::start(session, Box::new(BrokenInput), Arc::new(LoopbackRecognizer), settings());
    assert!(matches!(result, Err(VoiceError::Input(_))));
    assert!(recorder.lines().is_empty());
}
