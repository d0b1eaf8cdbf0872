//! Ascent - Watchface Firmware
//!
//! Main firmware binary for an RP2040-based wearable. The watch owns the
//! watchface logic; a BLE bridge on UART0 carries the companion link and a
//! display co-processor on UART1 renders the face.
//!
//! Pin assignments (Raspberry Pi Pico):
//! - GPIO0/1: UART0 TX/RX to the BLE bridge
//! - GPIO4/5: UART1 TX/RX to the display co-processor
//! - GPIO15: BLE bridge connection status (high = connected)
//! - GPIO24: VBUS sense (high = charging)
//! - GPIO29: VSYS / 3 on ADC3

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ascent_hal_rp2040::flash::Rp2040FlashStorage;
use ascent_hal_rp2040::rtc::RtcClock;

use crate::config::{load_face_config, read_stored_settings, FlashBackedStorage};

mod channels;
mod clock;
mod config;
mod display;
mod link;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

// Static cells for UART buffers (must live forever)
static COMPANION_TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static COMPANION_RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static DISPLAY_TX_BUF: StaticCell<[u8; 512]> = StaticCell::new();
static DISPLAY_RX_BUF: StaticCell<[u8; 16]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Ascent firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let face_config = load_face_config();

    // Settings are read once here; the persistence task owns flash after
    let mut flash = Rp2040FlashStorage::new(p.FLASH, p.DMA_CH0);
    let stored = read_stored_settings(&mut flash).await;
    let storage = FlashBackedStorage::new(stored);

    let mut rtc = RtcClock::new(p.RTC);
    if !rtc.is_running() {
        warn!("RTC not set, starting from fallback time");
        if let Err(e) = rtc.set(&clock::FALLBACK_TIME) {
            error!("Failed to start RTC: {:?}", defmt::Debug2Format(&e));
        }
    }
    clock::install(rtc);
    info!("RTC initialized");

    // Companion link: BLE bridge on UART0
    let companion = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let companion = companion.into_buffered(
        Irqs,
        COMPANION_TX_BUF.init([0u8; 256]),
        COMPANION_RX_BUF.init([0u8; 256]),
    );
    let (companion_tx, companion_rx) = companion.split();
    info!("UART0 initialized for companion link");

    // Display link: co-processor on UART1, transmit only
    let display = Uart::new_blocking(p.UART1, p.PIN_4, p.PIN_5, UartConfig::default());
    let display = display.into_buffered(
        Irqs,
        DISPLAY_TX_BUF.init([0u8; 512]),
        DISPLAY_RX_BUF.init([0u8; 16]),
    );
    let (display_tx, _display_rx) = display.split();
    info!("UART1 initialized for display link");

    // Status inputs
    let adc = Adc::new(p.ADC, Irqs, embassy_rp::adc::Config::default());
    let vsys = Channel::new_pin(p.PIN_29, Pull::None);
    let charging = Input::new(p.PIN_24, Pull::Down);
    let connected = Input::new(p.PIN_15, Pull::Down);
    info!("Status inputs initialized");

    // Spawn tasks
    spawner
        .spawn(tasks::controller_task(face_config, storage))
        .unwrap();
    spawner.spawn(tasks::display_tx_task(display_tx)).unwrap();
    spawner.spawn(tasks::companion_rx_task(companion_rx)).unwrap();
    spawner.spawn(tasks::companion_tx_task(companion_tx)).unwrap();
    spawner.spawn(tasks::persistence_task(flash)).unwrap();
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner
        .spawn(tasks::battery_task(adc, vsys, charging, face_config.battery))
        .unwrap();
    spawner.spawn(tasks::bluetooth_task(connected)).unwrap();

    info!("All tasks spawned, firmware running");
}
