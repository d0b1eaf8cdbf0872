//! Companion UART receive task
//!
//! Parses frames from the companion bridge. App messages are decoded into
//! controller events; ACK and NACK frames are handed to the TX task.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use ascent_core::state::{Event, LinkFailure};
use ascent_core::weather::decode;
use ascent_protocol::{CompanionFrame, Frame, FrameParser};

use crate::channels::{LinkVerdict, EVENT_CHANNEL, LINK_VERDICT};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Companion RX task - receives and parses frames from the companion
#[embassy_executor::task]
pub async fn companion_rx_task(mut rx: BufferedUartRx) {
    info!("Companion RX task started");

    let mut parser = FrameParser::new();
    let mut inbox = Inbox::default();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => inbox.handle_frame(&frame),
                        Ok(None) => {}
                        Err(e) => {
                            warn!("Frame parse error: {:?}", e);
                            inbox.report(Event::InboxDropped(LinkFailure::Frame(e)));
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
                parser.reset();
            }
        }
    }
}

/// Forwards inbound events without blocking the UART
#[derive(Default)]
struct Inbox {
    /// An event was lost to a full queue and not yet reported
    overflowed: bool,
}

impl Inbox {
    fn handle_frame(&mut self, frame: &Frame) {
        match CompanionFrame::from_frame(frame) {
            Ok(CompanionFrame::AppMessage { seq, dictionary }) => match decode(&dictionary) {
                Ok(batch) => {
                    debug!("App message {}: {} updates", seq, batch.len());
                    self.report(Event::Message(batch));
                }
                Err(e) => {
                    warn!("App message {} malformed: {:?}", seq, e);
                    self.report(Event::InboxDropped(LinkFailure::Malformed(e)));
                }
            },
            Ok(CompanionFrame::Ack { seq }) => {
                trace!("ACK {}", seq);
                LINK_VERDICT.signal(LinkVerdict::Ack { seq });
            }
            Ok(CompanionFrame::Nack { seq, reason }) => {
                debug!("NACK {}: {:?}", seq, reason);
                LINK_VERDICT.signal(LinkVerdict::Nack { seq, reason });
            }
            Err(e) => {
                warn!("Unknown companion frame {:#x}: {:?}", frame.msg_type, e);
                self.report(Event::InboxDropped(LinkFailure::Frame(e)));
            }
        }
    }

    fn report(&mut self, event: Event) {
        if self.overflowed
            && EVENT_CHANNEL
                .try_send(Event::InboxDropped(LinkFailure::Overflow))
                .is_ok()
        {
            self.overflowed = false;
        }

        if EVENT_CHANNEL.try_send(event).is_err() {
            warn!("Event queue full, dropping companion event");
            self.overflowed = true;
        }
    }
}
