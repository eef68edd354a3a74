mod tests {
    use lcc_light_fader::event::{decode_event_id, encode_event_id};
    use lcc_light_fader::{
        Channel, DEFAULT_BASE_EVENT_ID, EventIdSender, EventProducer, EventSender, FadeError,
        SendOutcome,
    };

    #[derive(Default)]
    struct Producer {
        events: Vec<u64>,
    }

    impl EventProducer for Producer {
        fn produce(&mut self, event_id: u64) -> SendOutcome {
            self.events.push(event_id);
            SendOutcome::Sent
        }
    }

    #[test]
    fn test_encode_event_id() {
        assert_eq!(
            encode_event_id(DEFAULT_BASE_EVENT_ID, Channel::Brightness, 180),
            0x0501_0101_2260_04B4
        );
        assert_eq!(
            encode_event_id(0x0102_0304_0506_FFFF, Channel::Red, 7),
            0x0102_0304_0506_0007
        );
    }

    #[test]
    fn test_decode_event_id() {
        assert_eq!(
            decode_event_id(DEFAULT_BASE_EVENT_ID, 0x0501_0101_2260_0278),
            Ok((Channel::Blue, 0x78))
        );
        assert_eq!(
            decode_event_id(DEFAULT_BASE_EVENT_ID, 0x0501_0101_2260_0501),
            Err(FadeError::InvalidArgument)
        );
        assert_eq!(
            decode_event_id(DEFAULT_BASE_EVENT_ID, 0x0501_0101_2261_0001),
            Err(FadeError::InvalidArgument)
        );
    }

    #[test]
    fn test_event_id_sender() {
        let mut sender = EventIdSender::new(Producer::default());
        assert_eq!(sender.send(Channel::White, 255), SendOutcome::Sent);

        sender.set_base_event_id(0x0A0B_0C0D_0E0F_0000);
        assert_eq!(sender.base_event_id(), 0x0A0B_0C0D_0E0F_0000);
        sender.send(Channel::Green, 1);

        assert_eq!(
            sender.into_inner().events,
            [0x0501_0101_2260_03FF, 0x0A0B_0C0D_0E0F_0101]
        );
    }
}
