//! GamepadEncoder: owns the gamepad state and sends a report whenever it changes.

use embedded_hal_async::delay::DelayNs;
use hid_gamepad_proto::{
    validate_axis, Buttons, GamepadReport, GamepadState, HatDirection, HatFlags, Joysticks,
    ReportError, HAT_CODE_MASK, HAT_RESERVED_BIT,
};

use crate::sink::{ReportSink, SinkError};

/// Delay before the single retry of the initial report.
pub const INIT_RETRY_DELAY_MS: u32 = 1_000;

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderConfig {
    /// How long to wait before retrying the initial report after a transient failure.
    pub init_retry_delay_ms: u32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            init_retry_delay_ms: INIT_RETRY_DELAY_MS,
        }
    }
}

/// A joystick update. Axes left as `None` keep their current value.
///
/// # Example
///
/// ```
/// use hid_gamepad::JoystickMove;
///
/// // Change x and y only.
/// let partial = JoystickMove::new().x(100).y(-50);
///
/// // Center every axis.
/// let center = JoystickMove::CENTER;
/// # let _ = (partial, center);
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub struct JoystickMove {
    pub x: Option<i16>,
    pub y: Option<i16>,
    pub z: Option<i16>,
    pub rz: Option<i16>,
}

impl JoystickMove {
    /// Every axis back to 0.
    pub const CENTER: Self = Self::all(0, 0, 0, 0);

    /// An update that changes nothing.
    pub const fn new() -> Self {
        Self {
            x: None,
            y: None,
            z: None,
            rz: None,
        }
    }

    /// Set all four axes.
    pub const fn all(x: i16, y: i16, z: i16, rz: i16) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
            rz: Some(rz),
        }
    }

    pub const fn x(mut self, value: i16) -> Self {
        self.x = Some(value);
        self
    }

    pub const fn y(mut self, value: i16) -> Self {
        self.y = Some(value);
        self
    }

    pub const fn z(mut self, value: i16) -> Self {
        self.z = Some(value);
        self
    }

    pub const fn rz(mut self, value: i16) -> Self {
        self.rz = Some(value);
        self
    }

    /// Apply to `current`, validating every provided axis before touching any.
    fn apply(self, current: Joysticks) -> Result<Joysticks, ReportError> {
        fn axis(value: Option<i16>, current: i8) -> Result<i8, ReportError> {
            value.map_or(Ok(current), validate_axis)
        }

        Ok(Joysticks {
            x: axis(self.x, current.x)?,
            y: axis(self.y, current.y)?,
            z: axis(self.z, current.z)?,
            rz: axis(self.rz, current.rz)?,
        })
    }
}

/// Error type for encoder operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderError {
    /// Invalid argument. Nothing was changed.
    Report(ReportError),
    /// Error from the report sink.
    Sink(SinkError),
}

impl From<ReportError> for EncoderError {
    fn from(err: ReportError) -> Self {
        EncoderError::Report(err)
    }
}

impl From<SinkError> for EncoderError {
    fn from(err: SinkError) -> Self {
        EncoderError::Sink(err)
    }
}

impl core::fmt::Display for EncoderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Report(e) => write!(f, "invalid input: {e}"),
            Self::Sink(e) => write!(f, "failed to send report: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncoderError {}

/// Gamepad state encoder.
///
/// Holds the buttons, joysticks and hat of one gamepad. Every operation
/// updates the state, encodes it into a [`GamepadReport`] and hands the report
/// to the sink, unless it is byte-identical to the last report sent.
///
/// Invalid arguments are rejected before anything changes. Sink errors are
/// returned to the caller without retrying; the state keeps the update, so
/// the next operation sends it.
///
/// Operations take `&mut self`; sharing one encoder between tasks needs a
/// mutex around the whole encoder.
pub struct GamepadEncoder<S> {
    sink: S,
    state: GamepadState,
    last_report: GamepadReport,
}

impl<S: ReportSink> GamepadEncoder<S> {
    /// Create an encoder with the default [`EncoderConfig`].
    ///
    /// See [`GamepadEncoder::with_config`].
    pub async fn new<D: DelayNs>(sink: S, delay: &mut D) -> Result<Self, EncoderError> {
        Self::with_config(sink, delay, EncoderConfig::default()).await
    }

    /// Create an encoder and send the neutral report to check the sink works.
    ///
    /// If the sink fails with a transient error, waits
    /// `config.init_retry_delay_ms` and tries exactly once more.
    ///
    /// # Errors
    ///
    /// Returns [`EncoderError::Sink`] if the retry fails too, or if the first
    /// failure is not transient.
    pub async fn with_config<D: DelayNs>(
        sink: S,
        delay: &mut D,
        config: EncoderConfig,
    ) -> Result<Self, EncoderError> {
        let mut encoder = Self {
            sink,
            state: GamepadState::neutral(),
            last_report: GamepadReport::NEUTRAL,
        };

        match encoder.reset_all().await {
            Ok(()) => {}
            Err(EncoderError::Sink(e)) if e.is_transient() => {
                warn!(
                    "Initial report failed: {:?}, retrying in {} ms",
                    e,
                    config.init_retry_delay_ms
                );
                delay.delay_ms(config.init_retry_delay_ms).await;
                encoder.reset_all().await?;
            }
            Err(e) => return Err(e),
        }

        debug!("Gamepad encoder ready");
        Ok(encoder)
    }

    /// Press and hold the given buttons (numbered 1 to 32).
    ///
    /// # Errors
    ///
    /// [`ReportError::InvalidButton`] if any number is out of range; no button changes.
    pub async fn press_buttons(&mut self, buttons: &[u8]) -> Result<(), EncoderError> {
        let mask = Buttons::from_numbers(buttons)?;
        self.state.buttons |= mask;
        self.flush(false).await
    }

    /// Release the given buttons (numbered 1 to 32).
    ///
    /// # Errors
    ///
    /// [`ReportError::InvalidButton`] if any number is out of range; no button changes.
    pub async fn release_buttons(&mut self, buttons: &[u8]) -> Result<(), EncoderError> {
        let mask = Buttons::from_numbers(buttons)?;
        self.state.buttons &= !mask;
        self.flush(false).await
    }

    /// Release every button.
    pub async fn release_all_buttons(&mut self) -> Result<(), EncoderError> {
        self.state.buttons = Buttons::NONE;
        self.flush(false).await
    }

    /// Press, then release, the given buttons.
    ///
    /// Sends a press report and a release report, each subject to duplicate
    /// suppression.
    pub async fn click_buttons(&mut self, buttons: &[u8]) -> Result<(), EncoderError> {
        self.press_buttons(buttons).await?;
        self.release_buttons(buttons).await
    }

    /// Move the joysticks. Axes left unset keep their value.
    ///
    /// # Errors
    ///
    /// [`ReportError::InvalidAxis`] if any provided value is outside `-127..=127`;
    /// no axis changes.
    pub async fn move_joysticks(&mut self, update: JoystickMove) -> Result<(), EncoderError> {
        self.state.joysticks = update.apply(self.state.joysticks)?;
        self.flush(false).await
    }

    /// Point the hat in `direction`, keeping the reserved hat bit.
    pub async fn set_hat_direction(&mut self, direction: HatDirection) -> Result<(), EncoderError> {
        self.state.hat = (self.state.hat & HAT_RESERVED_BIT) | (direction.code() & HAT_CODE_MASK);
        self.flush(false).await
    }

    /// Point the hat using a raw direction code.
    ///
    /// # Errors
    ///
    /// [`ReportError::InvalidHatDirection`] if `code` is not one of the nine direction codes.
    pub async fn set_hat_code(&mut self, code: u8) -> Result<(), EncoderError> {
        let direction = HatDirection::try_from(code)?;
        self.set_hat_direction(direction).await
    }

    /// Point the hat from the four switch levels, replacing the whole hat byte.
    ///
    /// # Errors
    ///
    /// [`ReportError::InvalidHatFlags`] for a combination no d-pad can produce.
    pub async fn set_hat_flags(&mut self, flags: HatFlags) -> Result<(), EncoderError> {
        let direction = flags.direction()?;
        self.state.hat = direction.code();
        self.flush(false).await
    }

    /// Release the hat. The released value is 0, which is also the code for up.
    pub async fn release_hat(&mut self) -> Result<(), EncoderError> {
        self.state.hat = 0;
        self.flush(false).await
    }

    /// Release all buttons, center the joysticks and release the hat.
    ///
    /// Always sends, even if the state was already neutral.
    pub async fn reset_all(&mut self) -> Result<(), EncoderError> {
        self.state = GamepadState::neutral();
        self.flush(true).await
    }

    /// Encode the current state and send it if it changed (or `force` is set).
    async fn flush(&mut self, force: bool) -> Result<(), EncoderError> {
        let report = GamepadReport::encode(&self.state);
        if !force && report == self.last_report {
            trace!("Report unchanged, not sending");
            return Ok(());
        }

        trace!("Sending report: {:?}", report);
        self.sink.send_report(&report).await?;
        self.last_report = report;
        Ok(())
    }

    /// Current gamepad state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &GamepadState {
        &self.state
    }

    /// The last report the sink accepted.
    #[inline]
    #[must_use]
    pub fn last_report(&self) -> &GamepadReport {
        &self.last_report
    }

    /// Get a reference to the report sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get a mutable reference to the report sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Drop the encoder and return its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::test_util::{block_on, MockDelay, MockSink};
    use hid_gamepad_proto::{HatSwitch, NUM_BUTTONS};
    use std::vec;

    fn encoder() -> GamepadEncoder<MockSink> {
        block_on(GamepadEncoder::new(MockSink::default(), &mut MockDelay::default())).unwrap()
    }

    fn last_sent(encoder: &GamepadEncoder<MockSink>) -> [u8; 9] {
        *encoder.sink().sent.last().unwrap().as_bytes()
    }

    #[test]
    fn test_new_sends_neutral_report() {
        let encoder = encoder();
        assert_eq!(encoder.sink().sent, vec![GamepadReport::NEUTRAL]);
        assert_eq!(*encoder.state(), GamepadState::neutral());
    }

    #[test]
    fn test_new_retries_once_after_transient_failure() {
        let mut delay = MockDelay::default();
        let encoder =
            block_on(GamepadEncoder::new(MockSink::failing(&[SinkError::NotReady]), &mut delay))
                .unwrap();

        assert_eq!(encoder.sink().attempts, 2);
        assert_eq!(encoder.sink().sent, vec![GamepadReport::NEUTRAL]);
        assert_eq!(delay.waited_ns, vec![1_000_000_000]);
    }

    #[test]
    fn test_new_uses_configured_retry_delay() {
        let mut delay = MockDelay::default();
        let config = EncoderConfig {
            init_retry_delay_ms: 250,
        };
        let result = block_on(GamepadEncoder::with_config(
            MockSink::failing(&[SinkError::Io]),
            &mut delay,
            config,
        ));
        assert!(result.is_ok());
        assert_eq!(delay.waited_ns, vec![250_000_000]);
    }

    #[test]
    fn test_new_fails_after_second_failure() {
        let mut delay = MockDelay::default();
        let result = block_on(GamepadEncoder::new(
            MockSink::failing(&[SinkError::Io, SinkError::Busy]),
            &mut delay,
        ));
        assert!(matches!(result, Err(EncoderError::Sink(SinkError::Busy))));
        assert_eq!(delay.waited_ns.len(), 1);
    }

    #[test]
    fn test_new_does_not_retry_permanent_failure() {
        let mut sink = MockSink::failing(&[SinkError::Dropped]);
        let mut delay = MockDelay::default();
        let result = block_on(GamepadEncoder::new(&mut sink, &mut delay));
        assert!(matches!(result, Err(EncoderError::Sink(SinkError::Dropped))));
        assert_eq!(sink.attempts, 1);
        assert!(delay.waited_ns.is_empty());
    }

    #[test]
    fn test_press_and_release_every_button() {
        let mut encoder = encoder();
        for n in 1..=NUM_BUTTONS {
            block_on(encoder.press_buttons(&[n])).unwrap();
            let bytes = last_sent(&encoder);
            assert_eq!(
                u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
                1 << (n - 1)
            );

            block_on(encoder.release_buttons(&[n])).unwrap();
            assert_eq!(last_sent(&encoder), [0u8; 9]);
        }
    }

    #[test]
    fn test_press_batch_sends_once() {
        let mut encoder = encoder();
        block_on(encoder.press_buttons(&[1, 2, 32])).unwrap();
        assert_eq!(encoder.sink().sent.len(), 2);
        assert_eq!(&last_sent(&encoder)[..4], &[0x03, 0x00, 0x00, 0x80]);
    }

    #[test]
    fn test_invalid_button_changes_nothing() {
        let mut encoder = encoder();
        block_on(encoder.press_buttons(&[4])).unwrap();

        let bad_batches: [&[u8]; 4] = [&[0], &[33], &[5, 33], &[1, 0, 2]];
        for bad in bad_batches {
            let result = block_on(encoder.press_buttons(bad));
            assert!(matches!(
                result,
                Err(EncoderError::Report(ReportError::InvalidButton(_)))
            ));
            let result = block_on(encoder.release_buttons(bad));
            assert!(result.is_err());
        }

        assert_eq!(encoder.state().buttons, Buttons::from_number(4).unwrap());
        assert_eq!(encoder.sink().sent.len(), 2);
    }

    #[test]
    fn test_release_all_buttons() {
        let mut encoder = encoder();
        block_on(encoder.press_buttons(&[1, 7, 20])).unwrap();
        block_on(encoder.release_all_buttons()).unwrap();
        assert!(encoder.state().buttons.is_empty());
        assert_eq!(last_sent(&encoder), [0u8; 9]);
    }

    #[test]
    fn test_click_sends_two_reports() {
        let mut encoder = encoder();
        block_on(encoder.click_buttons(&[5])).unwrap();

        let sent = &encoder.sink().sent;
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[1].as_bytes()[0], 0b1_0000);
        assert_eq!(sent[2], GamepadReport::NEUTRAL);
    }

    #[test]
    fn test_click_held_button_sends_only_release() {
        let mut encoder = encoder();
        block_on(encoder.press_buttons(&[5])).unwrap();
        block_on(encoder.click_buttons(&[5])).unwrap();

        let sent = &encoder.sink().sent;
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[2], GamepadReport::NEUTRAL);
    }

    #[test]
    fn test_move_joysticks_every_x_value() {
        let mut encoder = encoder();
        for x in -127i16..=127 {
            block_on(encoder.move_joysticks(JoystickMove::new().x(x))).unwrap();
            assert_eq!(encoder.last_report().as_bytes()[4], x as i8 as u8);
        }
    }

    #[test]
    fn test_move_joysticks_keeps_unset_axes() {
        let mut encoder = encoder();
        block_on(encoder.move_joysticks(JoystickMove::all(10, 20, 30, 40))).unwrap();
        block_on(encoder.move_joysticks(JoystickMove::new().y(-50))).unwrap();
        assert_eq!(
            encoder.state().joysticks,
            Joysticks {
                x: 10,
                y: -50,
                z: 30,
                rz: 40
            }
        );
        assert_eq!(&last_sent(&encoder)[4..8], &[10, 0xCE, 30, 40]);
    }

    #[test]
    fn test_invalid_axis_changes_nothing() {
        let mut encoder = encoder();
        block_on(encoder.move_joysticks(JoystickMove::all(1, 2, 3, 4))).unwrap();
        let before = *encoder.state();

        let result = block_on(encoder.move_joysticks(JoystickMove::new().x(-128)));
        assert_eq!(
            result,
            Err(EncoderError::Report(ReportError::InvalidAxis(-128)))
        );

        // A valid axis next to an invalid one is not applied either.
        let result = block_on(encoder.move_joysticks(JoystickMove::new().x(100).rz(200)));
        assert_eq!(
            result,
            Err(EncoderError::Report(ReportError::InvalidAxis(200)))
        );

        assert_eq!(*encoder.state(), before);
        assert_eq!(encoder.sink().sent.len(), 2);
    }

    #[test]
    fn test_hat_from_flags() {
        let mut encoder = encoder();
        let cases: [([u8; 4], u8); 3] = [
            ([1, 0, 0, 0], 0x00),
            ([1, 1, 0, 0], 0x01),
            ([0, 0, 1, 1], 0x05),
        ];
        for (levels, code) in cases {
            let flags = HatFlags::try_from(levels).unwrap();
            block_on(encoder.set_hat_flags(flags)).unwrap();
            assert_eq!(encoder.last_report().hat(), code);
        }
    }

    #[test]
    fn test_hat_contradictory_flags_rejected() {
        let mut encoder = encoder();
        block_on(encoder.set_hat_direction(HatDirection::Left)).unwrap();

        let up_down = HatFlags::new(true, false, true, false);
        let result = block_on(encoder.set_hat_flags(up_down));
        assert_eq!(
            result,
            Err(EncoderError::Report(ReportError::InvalidHatFlags(up_down)))
        );
        assert_eq!(encoder.state().hat, HatDirection::Left.code());
    }

    #[test]
    fn test_hat_code_path() {
        let mut encoder = encoder();
        block_on(encoder.set_hat_code(0x0F)).unwrap();
        assert_eq!(encoder.last_report().hat(), 0x0F);

        let result = block_on(encoder.set_hat_code(0x08));
        assert_eq!(
            result,
            Err(EncoderError::Report(ReportError::InvalidHatDirection(0x08)))
        );
        assert_eq!(encoder.state().hat, 0x0F);
    }

    #[test]
    fn test_hat_flags_from_switches() {
        let mut encoder = encoder();
        let flags = HatFlags::NONE
            .with(HatSwitch::Down, true)
            .with(HatSwitch::Right, true);
        block_on(encoder.set_hat_flags(flags)).unwrap();
        assert_eq!(encoder.state().hat, HatDirection::DownRight.code());
    }

    #[test]
    fn test_release_hat() {
        let mut encoder = encoder();
        block_on(encoder.set_hat_direction(HatDirection::Down)).unwrap();
        block_on(encoder.release_hat()).unwrap();
        assert_eq!(encoder.state().hat, 0);
        assert_eq!(last_sent(&encoder)[8], 0);
    }

    #[test]
    fn test_duplicate_reports_suppressed() {
        let mut encoder = encoder();
        block_on(encoder.press_buttons(&[3])).unwrap();
        block_on(encoder.press_buttons(&[3])).unwrap();
        block_on(encoder.move_joysticks(JoystickMove::CENTER)).unwrap();
        block_on(encoder.release_hat()).unwrap();
        block_on(encoder.set_hat_direction(HatDirection::Up)).unwrap();
        assert_eq!(encoder.sink().sent.len(), 2);
    }

    #[test]
    fn test_reset_all_always_sends() {
        let mut encoder = encoder();
        block_on(encoder.reset_all()).unwrap();
        block_on(encoder.reset_all()).unwrap();
        assert_eq!(encoder.sink().sent.len(), 3);
        assert!(encoder
            .sink()
            .sent
            .iter()
            .all(|r| *r == GamepadReport::NEUTRAL));
    }

    #[test]
    fn test_reset_all_clears_everything() {
        let mut encoder = encoder();
        block_on(encoder.press_buttons(&[1, 16])).unwrap();
        block_on(encoder.move_joysticks(JoystickMove::all(-1, -2, -3, -4))).unwrap();
        block_on(encoder.set_hat_direction(HatDirection::UpLeft)).unwrap();
        block_on(encoder.reset_all()).unwrap();
        assert_eq!(*encoder.state(), GamepadState::neutral());
        assert_eq!(last_sent(&encoder), [0u8; 9]);
    }

    #[test]
    fn test_sink_error_propagates_and_is_resent() {
        let mut encoder = encoder();
        encoder.sink_mut().failures.push_back(SinkError::Busy);

        let result = block_on(encoder.press_buttons(&[2]));
        assert_eq!(result, Err(EncoderError::Sink(SinkError::Busy)));
        assert_eq!(*encoder.last_report(), GamepadReport::NEUTRAL);

        // The unchanged state differs from the last accepted report, so it goes out now.
        block_on(encoder.press_buttons(&[2])).unwrap();
        assert_eq!(encoder.sink().sent.len(), 2);
        assert_eq!(last_sent(&encoder)[0], 0b10);
    }

    #[test]
    fn test_report_decodes_to_state() {
        let mut encoder = encoder();
        block_on(encoder.press_buttons(&[1, 9, 17, 25])).unwrap();
        block_on(encoder.release_buttons(&[9])).unwrap();
        block_on(encoder.move_joysticks(JoystickMove::all(127, -127, 64, -64))).unwrap();
        block_on(encoder.set_hat_flags(HatFlags::new(false, false, false, true))).unwrap();

        let decoded = GamepadReport::decode(encoder.last_report().as_bytes()).unwrap();
        assert_eq!(decoded, *encoder.state());
    }

    #[test]
    fn test_into_sink() {
        let mut encoder = encoder();
        block_on(encoder.click_buttons(&[1, 2])).unwrap();
        let sink = encoder.into_sink();
        assert_eq!(sink.sent.len(), 3);
    }
}
