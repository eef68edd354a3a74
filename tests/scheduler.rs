mod tests {
    use embassy_time::{Duration, Instant};
    use lcc_light_fader::{
        Channel, CommandQueue, EventSender, FadeCommand, FadeController, FadeError, FadeState,
        FaderConfig, LightingState, SendOutcome, TickScheduler, TransitionRequest,
    };

    #[derive(Default)]
    struct Bus {
        sent: Vec<(Channel, u8)>,
    }

    impl EventSender for Bus {
        fn send(&mut self, channel: Channel, value: u8) -> SendOutcome {
            self.sent.push((channel, value));
            SendOutcome::Sent
        }
    }

    const SCENE: LightingState = LightingState::new(10, 20, 30, 40, 50);

    fn controller() -> FadeController {
        FadeController::with_state(FaderConfig::default(), LightingState::OFF)
    }

    #[test]
    fn test_command_queue_is_bounded() {
        let queue: CommandQueue<2> = CommandQueue::new();
        assert!(queue.is_empty());
        queue.push(FadeCommand::Abort).unwrap();
        queue.push(FadeCommand::Abort).unwrap();
        assert_eq!(
            queue.push(FadeCommand::SetCurrent(SCENE)),
            Err(FadeCommand::SetCurrent(SCENE))
        );
        assert_eq!(queue.len(), 2);
        queue.clear();
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_push_latest_keeps_only_last_transition() {
        let queue: CommandQueue<3> = CommandQueue::new();
        let seed = LightingState::new(1, 1, 1, 1, 1);
        queue
            .push(FadeCommand::Start(TransitionRequest::new(SCENE, 100)))
            .unwrap();
        queue.push(FadeCommand::SetCurrent(seed)).unwrap();
        queue.push(FadeCommand::Abort).unwrap();

        for brightness in 0..10 {
            let target = LightingState::new(0, 0, 0, 0, brightness);
            queue
                .push_latest(FadeCommand::Start(TransitionRequest::new(target, 500)))
                .unwrap();
        }

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some(FadeCommand::SetCurrent(seed)));
        assert_eq!(
            queue.pop(),
            Some(FadeCommand::Start(TransitionRequest::new(
                LightingState::new(0, 0, 0, 0, 9),
                500
            )))
        );
    }

    #[test]
    fn test_rejected_command_keeps_rest_queued() {
        let queue: CommandQueue<4> = CommandQueue::new();
        queue.push(FadeCommand::SetCurrent(SCENE)).unwrap();
        queue.push(FadeCommand::Abort).unwrap();
        let mut scheduler =
            TickScheduler::new(FadeController::new(), &queue, Bus::default());

        assert!(matches!(
            scheduler.tick(Instant::from_millis(0)),
            Err(FadeError::NotInitialized)
        ));
        assert_eq!(queue.pop(), Some(FadeCommand::Abort));
    }

    #[test]
    fn test_commands_are_applied_on_tick() {
        let queue: CommandQueue<4> = CommandQueue::new();
        let mut scheduler = TickScheduler::new(controller(), &queue, Bus::default());

        queue.push(FadeCommand::ApplyImmediate(SCENE)).unwrap();
        let result = scheduler.tick(Instant::from_millis(0)).unwrap();

        assert_eq!(result.state, FadeState::Complete);
        assert_eq!(result.next_deadline, Instant::from_millis(10));
        assert_eq!(result.sleep_duration, Duration::from_millis(10));
        assert_eq!(scheduler.sender().sent.len(), 5);
        assert_eq!(scheduler.sender().sent[0], (Channel::Brightness, 50));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_fade_runs_through_scheduler() {
        let queue: CommandQueue<4> = CommandQueue::new();
        let mut scheduler = TickScheduler::new(controller(), &queue, Bus::default());
        queue
            .push(FadeCommand::SetCurrent(LightingState::new(0, 0, 0, 0, 255)))
            .unwrap();
        queue
            .push(FadeCommand::Start(TransitionRequest::new(SCENE, 200)))
            .unwrap();

        let mut now = 0;
        loop {
            let result = scheduler.tick(Instant::from_millis(now)).unwrap();
            if result.state == FadeState::Complete {
                break;
            }
            now = result.next_deadline.as_millis();
            assert!(now <= 300);
        }

        assert_eq!(scheduler.controller().get_current(), Ok(SCENE));
        assert_eq!(scheduler.sender().sent.first(), Some(&(Channel::Brightness, 255)));

        queue.push(FadeCommand::Abort).unwrap();
        let result = scheduler.tick(Instant::from_millis(now + 10)).unwrap();
        assert_eq!(result.state, FadeState::Idle);
    }

    #[test]
    fn test_drift_resets_schedule() {
        let queue: CommandQueue<1> = CommandQueue::new();
        let mut scheduler = TickScheduler::new(controller(), &queue, Bus::default());

        scheduler.tick(Instant::from_millis(0)).unwrap();
        let result = scheduler.tick(Instant::from_millis(100)).unwrap();
        assert_eq!(result.next_deadline, Instant::from_millis(110));
        assert_eq!(result.sleep_duration, Duration::from_millis(10));

        // slightly late ticks keep the cadence
        let result = scheduler.tick(Instant::from_millis(115)).unwrap();
        assert_eq!(result.next_deadline, Instant::from_millis(120));
        assert_eq!(result.sleep_duration, Duration::from_millis(5));
    }

    #[test]
    fn test_uninitialized_controller_is_reported() {
        let queue: CommandQueue<1> = CommandQueue::new();
        let mut scheduler =
            TickScheduler::new(FadeController::new(), &queue, Bus::default());
        assert!(matches!(
            scheduler.tick(Instant::from_millis(0)),
            Err(FadeError::NotInitialized)
        ));

        scheduler.controller_mut().init();
        assert!(scheduler.tick(Instant::from_millis(10)).is_ok());
    }
}
