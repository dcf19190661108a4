#![no_std]
#![no_main]

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_time::{Delay, Duration, Ticker};
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig};
use keypad_firmware::{
    configure_usb_hid, GamepadEncoder, GamepadHidWriter, GamepadRequestHandler, KeyMapper,
    Keypad, UsbHidSink,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// How often the keypad is polled.
const SCAN_INTERVAL: Duration = Duration::from_millis(5);

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();
static HID_HANDLER: StaticCell<GamepadRequestHandler> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Keypad gamepad starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Keypad Setup ---
    let keypad = Keypad::new([
        Input::new(p.PIN_21, Pull::Up),
        Input::new(p.PIN_20, Pull::Up),
        Input::new(p.PIN_19, Pull::Up),
        Input::new(p.PIN_18, Pull::Up),
        Input::new(p.PIN_17, Pull::Up),
        Input::new(p.PIN_16, Pull::Up),
        Input::new(p.PIN_15, Pull::Up),
        Input::new(p.PIN_14, Pull::Up),
        Input::new(p.PIN_13, Pull::Up),
        Input::new(p.PIN_12, Pull::Up),
        Input::new(p.PIN_11, Pull::Up),
        Input::new(p.PIN_10, Pull::Up),
        Input::new(p.PIN_9, Pull::Up),
        Input::new(p.PIN_8, Pull::Up),
        Input::new(p.PIN_7, Pull::Up),
        Input::new(p.PIN_6, Pull::Up),
    ]);

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(0x1209, 0x0001); // pid.codes test VID/PID
    usb_config.manufacturer = Some("Rust Gamepad");
    usb_config.product = Some("Keypad Gamepad");
    usb_config.serial_number = Some("001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    // Configure HID class
    let hid_state = HID_STATE.init(State::new());
    let hid_handler = HID_HANDLER.init(GamepadRequestHandler);
    let hid_writer = configure_usb_hid(&mut builder, hid_state, hid_handler);

    // Build the USB device
    let usb_device = builder.build();

    // Optional: LED for error indication (on-board LED on Pico)
    let led = Output::new(p.PIN_25, Level::Low);

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(usb_task(usb_device).unwrap());
    spawner.spawn(gamepad_task(hid_writer, keypad, led).unwrap());

    info!("Keypad gamepad initialized, waiting for USB...");
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Gamepad task - scans the keypad and sends reports for every change.
#[embassy_executor::task]
async fn gamepad_task(
    writer: GamepadHidWriter<'static>,
    mut keypad: Keypad<Input<'static>>,
    mut led: Output<'static>,
) {
    let mut sink = UsbHidSink::new(writer);

    // Wait for USB to be ready
    sink.wait_ready().await;

    let mut gamepad = match GamepadEncoder::new(sink, &mut Delay).await {
        Ok(gamepad) => gamepad,
        Err(e) => {
            error!("Gamepad init failed: {:?}", e);
            led.set_high();
            return;
        }
    };
    info!("USB HID ready, scanning keypad...");

    let mut mapper = KeyMapper::new();
    let mut ticker = Ticker::every(SCAN_INTERVAL);
    loop {
        for event in keypad.scan() {
            if let Err(e) = mapper.handle(&mut gamepad, event).await {
                error!("Key {} not reported: {:?}", event.key, e);
                // Toggle LED to indicate error
                led.toggle();
            }
        }
        ticker.next().await;
    }
}
