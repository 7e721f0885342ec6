/// A device that accumulates raw input between frames.
///
/// # Contract
///
/// [`poll`](Self::poll) is a destructive read: it returns everything
/// accumulated since the previous call and resets the accumulator to zero.
/// Level signals (a held joystick, an analog stick) are the exception; they
/// report their current value on every poll.
pub trait InputSource {
    type Delta;

    fn poll(&mut self) -> Self::Delta;
}
