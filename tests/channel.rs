mod tests {
    use smart_stairs_engine::channel::{Channel, ChannelFull};

    #[test]
    fn test_fifo_order() {
        let channel = Channel::<u8, 4>::new();
        channel.try_send(1).unwrap();
        channel.try_send(2).unwrap();
        channel.try_send(3).unwrap();

        assert_eq!(channel.try_receive(), Some(1));
        assert_eq!(channel.try_receive(), Some(2));
        assert_eq!(channel.try_receive(), Some(3));
        assert_eq!(channel.try_receive(), None);
    }

    #[test]
    fn test_full_channel_returns_value() {
        let channel = Channel::<u8, 2>::new();
        channel.try_send(1).unwrap();
        channel.try_send(2).unwrap();
        assert_eq!(channel.try_send(3), Err(ChannelFull(3)));
        assert_eq!(channel.len(), 2);
    }

    #[test]
    fn test_handles_share_the_channel() {
        let channel = Channel::<u8, 4>::new();
        let sender = channel.sender();
        let receiver = channel.receiver();
        let second_sender = sender;

        sender.try_send(7).unwrap();
        second_sender.try_send(8).unwrap();
        assert_eq!(receiver.try_receive(), Some(7));
        assert_eq!(receiver.try_receive(), Some(8));
        assert!(channel.is_empty());
    }

    #[test]
    fn test_drained_channel_accepts_again() {
        let channel = Channel::<u8, 1>::new();
        channel.try_send(1).unwrap();
        assert!(channel.try_send(2).is_err());
        assert_eq!(channel.try_receive(), Some(1));
        channel.try_send(2).unwrap();
        assert_eq!(channel.try_receive(), Some(2));
    }
}
