mod common;

mod tests {
    use embassy_time::{Duration, Instant};
    use screen_lamp::color::{named, rgb_from_u32};
    use screen_lamp::intent::{IntentChannel, LampIntent};
    use screen_lamp::lamp::{DEFAULT_LAMP_CONFIG, Drag, MIN_BRIGHTNESS};
    use screen_lamp::preferences::{KEY_SHOW_TUTORIAL, MemoryPreferences, PreferenceStore};
    use screen_lamp::scene::SceneId;
    use screen_lamp::session::{
        DEFAULT_SESSION_CONFIG, LampSession, MAX_TICK_EVENTS, SessionConfig,
    };
    use screen_lamp::timer::{ExpiryAction, TimerConfig, TimerEvent, TimerOption};

    use crate::common::{RecordingDisplay, approx_eq};

    const INTENT_CHANNEL_SIZE: usize = 8;

    type Session<'a> = LampSession<'a, RecordingDisplay, MemoryPreferences<4>, INTENT_CHANNEL_SIZE>;

    const MINUTE_TICKS: TimerConfig = TimerConfig {
        tick_interval: Duration::from_millis(60_000),
        expiry_action: ExpiryAction::None,
    };

    fn session<'a>(
        channel: &'a IntentChannel<INTENT_CHANNEL_SIZE>,
        config: &SessionConfig,
    ) -> Session<'a> {
        LampSession::new(
            channel.receiver(),
            RecordingDisplay::default(),
            MemoryPreferences::new(),
            config,
        )
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_intents_are_drained_on_tick() {
        let channel = IntentChannel::new();
        let mut session = session(&channel, &DEFAULT_SESSION_CONFIG);
        let sender = channel.sender();

        sender
            .try_send(LampIntent::ActivateScene(SceneId::Night))
            .unwrap();
        sender
            .try_send(LampIntent::Drag(Drag {
                dx: 0.0,
                dy: 20.0,
                container_height: 100,
            }))
            .unwrap();
        assert_eq!(session.lamp().color(), named::WHITE);

        let result = session.tick(at(0));
        assert!(result.timer_events.is_empty());
        assert_eq!(result.next_deadline, None);
        assert_eq!(result.sleep_duration, None);
        assert!(channel.is_empty());

        assert_eq!(session.lamp().color(), rgb_from_u32(0xFF_6B6B));
        assert!(approx_eq(session.lamp().brightness(), 0.1));
    }

    #[test]
    fn test_event_burst_spills_into_next_tick() {
        let channel = IntentChannel::<16>::new();
        let mut session: LampSession<'_, RecordingDisplay, MemoryPreferences<4>, 16> =
            LampSession::new(
                channel.receiver(),
                RecordingDisplay::default(),
                MemoryPreferences::new(),
                &DEFAULT_SESSION_CONFIG,
            );
        for _ in 0..5 {
            channel
                .try_send(LampIntent::StartTimer { minutes: 1 })
                .unwrap();
            channel.try_send(LampIntent::CancelTimer).unwrap();
        }

        let first = session.tick(at(0));
        assert_eq!(first.timer_events.len(), MAX_TICK_EVENTS - 1);
        assert_eq!(first.sleep_duration, Some(Duration::from_ticks(0)));
        assert_eq!(channel.len(), 3);

        let second = session.tick(at(0));
        assert_eq!(second.timer_events.len(), 3);
        assert!(channel.is_empty());
        assert_eq!(second.sleep_duration, None);

        let events: std::vec::Vec<TimerEvent> = first
            .timer_events
            .iter()
            .chain(second.timer_events.iter())
            .copied()
            .collect();
        assert_eq!(events.len(), 10);
        for (index, event) in events.iter().enumerate() {
            if index % 2 == 0 {
                assert!(matches!(event, TimerEvent::Started(_)));
            } else {
                assert_eq!(*event, TimerEvent::Cancelled);
            }
        }
        assert!(!session.timer().is_active());
    }

    #[test]
    fn test_countdown_end_to_end() {
        let channel = IntentChannel::new();
        let config = SessionConfig {
            lamp: DEFAULT_LAMP_CONFIG,
            timer: MINUTE_TICKS,
        };
        let mut session = session(&channel, &config);

        let started = session.apply(LampIntent::StartTimer { minutes: 30 }, at(0));
        assert!(matches!(started, Some(TimerEvent::Started(_))));

        let mut finished = 0;
        for minute in 1..=30 {
            let result = session.tick(at(minute * 60_000));
            finished += result
                .timer_events
                .iter()
                .filter(|event| **event == TimerEvent::Finished)
                .count();
        }
        assert_eq!(finished, 1);
        assert!(!session.timer().is_active());
        assert_eq!(session.remaining(), None);
    }

    #[test]
    fn test_cancel_reports_cancelled_not_finished() {
        let channel = IntentChannel::new();
        let config = SessionConfig {
            lamp: DEFAULT_LAMP_CONFIG,
            timer: MINUTE_TICKS,
        };
        let mut session = session(&channel, &config);
        session.apply(LampIntent::StartTimer { minutes: 30 }, at(0));

        for minute in 1..=15 {
            session.tick(at(minute * 60_000));
        }
        assert_eq!(session.remaining(), Some(Duration::from_secs(15 * 60)));

        channel.try_send(LampIntent::CancelTimer).unwrap();
        let result = session.tick(at(15 * 60_000 + 1));
        assert_eq!(result.timer_events.as_slice(), &[TimerEvent::Cancelled]);

        for minute in 16..=45 {
            let result = session.tick(at(minute * 60_000));
            assert!(result.timer_events.is_empty());
            assert!(!result.timer_finished());
        }

        // Nothing left to cancel
        assert_eq!(session.apply(LampIntent::CancelTimer, at(0)), None);
    }

    #[test]
    fn test_selecting_infinite_cancels_countdown() {
        let channel = IntentChannel::new();
        let mut session = session(&channel, &DEFAULT_SESSION_CONFIG);

        session.apply(LampIntent::SelectTimer(TimerOption::Minutes(30)), at(0));
        assert!(session.timer().is_active());

        let event = session.apply(LampIntent::SelectTimer(TimerOption::Infinite), at(10));
        assert_eq!(event, Some(TimerEvent::Cancelled));
        assert!(!session.timer().is_active());
    }

    #[test]
    fn test_second_countdown_replaces_first() {
        let channel = IntentChannel::new();
        let config = SessionConfig {
            lamp: DEFAULT_LAMP_CONFIG,
            timer: MINUTE_TICKS,
        };
        let mut session = session(&channel, &config);

        session.apply(LampIntent::StartTimer { minutes: 2 }, at(0));
        session.apply(LampIntent::StartTimer { minutes: 5 }, at(30_000));

        // The first countdown would have finished here
        let result = session.tick(at(120_000));
        assert!(!result.timer_finished());
        assert_eq!(session.remaining(), Some(Duration::from_secs(4 * 60)));
        assert_eq!(result.next_deadline, Some(at(150_000)));
        assert_eq!(result.sleep_duration, Some(Duration::from_millis(30_000)));
    }

    #[test]
    fn test_expiry_forces_brightness_and_stops_scene() {
        let channel = IntentChannel::new();
        let config = SessionConfig {
            lamp: DEFAULT_LAMP_CONFIG,
            timer: TimerConfig {
                expiry_action: ExpiryAction::ForceBrightness(0.0),
                ..MINUTE_TICKS
            },
        };
        let mut session = session(&channel, &config);

        session.apply(LampIntent::ActivateScene(SceneId::Sunset), at(0));
        session.apply(LampIntent::StartTimer { minutes: 1 }, at(0));

        let result = session.tick(at(60_000));
        assert!(result.timer_finished());
        assert_eq!(session.lamp().brightness(), MIN_BRIGHTNESS);
        assert_eq!(session.scenes().current(), None);
        assert_eq!(result.next_deadline, None);
    }

    #[test]
    fn test_default_expiry_leaves_lamp_alone() {
        let channel = IntentChannel::new();
        let mut session = session(&channel, &DEFAULT_SESSION_CONFIG);
        session.apply(LampIntent::SetBrightness(0.6), at(0));
        session.apply(LampIntent::StartTimer { minutes: 1 }, at(0));

        let result = session.tick(at(60_000));
        assert!(result.timer_finished());
        assert!(approx_eq(session.lamp().brightness(), 0.6));
    }

    #[test]
    fn test_next_deadline_is_earliest_task() {
        let channel = IntentChannel::new();
        let mut session = session(&channel, &DEFAULT_SESSION_CONFIG);
        session.apply(LampIntent::ActivateScene(SceneId::Rainbow), at(0));
        assert_eq!(session.next_deadline(), Some(at(2000)));

        session.apply(LampIntent::StartTimer { minutes: 1 }, at(0));
        assert_eq!(session.next_deadline(), Some(at(1000)));

        session.apply(LampIntent::StopScene, at(0));
        session.apply(LampIntent::CancelTimer, at(0));
        assert_eq!(session.next_deadline(), None);
    }

    #[test]
    fn test_tutorial_and_teardown() {
        let channel = IntentChannel::new();
        let mut session = session(&channel, &DEFAULT_SESSION_CONFIG);
        assert!(session.tutorial().should_show());

        session.apply(LampIntent::CompleteTutorial, at(0));
        assert!(!session.tutorial().should_show());

        session.apply(LampIntent::ActivateScene(SceneId::Rainbow), at(0));
        session.apply(LampIntent::StartTimer { minutes: 1 }, at(0));

        let (display, prefs) = session.end();
        assert!(display.restored);
        assert_eq!(prefs.read_bool(KEY_SHOW_TUTORIAL), Ok(Some(false)));
    }

    #[test]
    fn test_picker_color_keeps_scene_running() {
        let channel = IntentChannel::new();
        let mut session = session(&channel, &DEFAULT_SESSION_CONFIG);
        session.apply(LampIntent::ActivateScene(SceneId::Rainbow), at(0));
        session.apply(LampIntent::SetColor(named::PINK), at(100));
        assert_eq!(session.lamp().color(), named::PINK);

        session.tick(at(2000));
        assert_eq!(session.lamp().color(), named::GREEN);
    }
}
