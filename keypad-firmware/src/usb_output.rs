//! USB HID transport for gamepad reports.

use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{HidWriter, ReportId, RequestHandler, State};
use embassy_usb::control::OutResponse;
use embassy_usb::driver::EndpointError;
use embassy_usb::Builder;
use hid_gamepad::{
    GamepadReport, ReportSink, SinkError, REPORT_DESCRIPTOR, REPORT_ID, REPORT_SIZE,
};

/// Bytes written per report: the report ID followed by the report.
const WIRE_SIZE: usize = REPORT_SIZE + 1;

/// Interrupt endpoint packet size.
const MAX_PACKET_SIZE: usize = 16;

/// HID writer type for the RP2040 USB peripheral.
pub type GamepadHidWriter<'d> = HidWriter<'d, Driver<'d, USB>, MAX_PACKET_SIZE>;

/// Convert endpoint errors to [`SinkError`].
///
/// A helper function instead of a `From` impl because both types live in other crates.
#[inline]
fn endpoint_error_to_sink_error(e: EndpointError) -> SinkError {
    match e {
        EndpointError::Disabled => SinkError::NotReady,
        EndpointError::BufferOverflow => SinkError::Dropped,
    }
}

/// USB HID report sink.
///
/// Wraps an embassy-usb HID writer and prefixes every report with [`REPORT_ID`].
pub struct UsbHidSink<'d> {
    writer: GamepadHidWriter<'d>,
}

impl<'d> UsbHidSink<'d> {
    /// Create a new sink from the given HID writer.
    pub fn new(writer: GamepadHidWriter<'d>) -> Self {
        Self { writer }
    }

    /// Wait until the device is ready (USB enumerated).
    pub async fn wait_ready(&mut self) {
        self.writer.ready().await;
    }
}

impl ReportSink for UsbHidSink<'_> {
    async fn send_report(&mut self, report: &GamepadReport) -> Result<(), SinkError> {
        let mut packet = [0u8; WIRE_SIZE];
        packet[0] = REPORT_ID;
        packet[1..].copy_from_slice(report.as_bytes());
        self.writer
            .write(&packet)
            .await
            .map_err(endpoint_error_to_sink_error)
    }
}

/// HID request handler (handles SET_REPORT, etc.).
///
/// The gamepad has no output or feature reports, so this accepts and ignores everything.
pub struct GamepadRequestHandler;

impl RequestHandler for GamepadRequestHandler {
    fn get_report(&mut self, _id: ReportId, _buf: &mut [u8]) -> Option<usize> {
        None
    }

    fn set_report(&mut self, _id: ReportId, _data: &[u8]) -> OutResponse {
        OutResponse::Accepted
    }

    fn set_idle_ms(&mut self, _id: Option<ReportId>, _duration_ms: u32) {}

    fn get_idle_ms(&mut self, _id: Option<ReportId>) -> Option<u32> {
        None
    }
}

/// Configure the USB HID class in the USB builder.
///
/// Returns the HID writer for use by the application.
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, Driver<'d, USB>>,
    state: &'d mut State<'d>,
    request_handler: &'d mut GamepadRequestHandler,
) -> GamepadHidWriter<'d> {
    let config = embassy_usb::class::hid::Config {
        report_descriptor: REPORT_DESCRIPTOR,
        request_handler: Some(request_handler as &mut dyn RequestHandler),
        poll_ms: 1,
        max_packet_size: MAX_PACKET_SIZE as _,
        hid_subclass: embassy_usb::class::hid::HidSubclass::No,
        hid_boot_protocol: embassy_usb::class::hid::HidBootProtocol::None,
    };

    HidWriter::new(builder, state, config)
}
