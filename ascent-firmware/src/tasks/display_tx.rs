//! Display UART transmit task
//!
//! Writes queued draw frames to the display co-processor.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use ascent_protocol::frame::MAX_FRAME_SIZE;

use crate::channels::DRAW_CHANNEL;

/// Display TX task - sends draw frames over UART1
#[embassy_executor::task]
pub async fn display_tx_task(mut tx: BufferedUartTx) {
    info!("Display TX task started");

    let mut buf = [0u8; MAX_FRAME_SIZE];

    loop {
        let frame = DRAW_CHANNEL.receive().await;

        let len = match frame.encode(&mut buf) {
            Ok(len) => len,
            Err(e) => {
                warn!("Failed to encode draw frame: {:?}", e);
                continue;
            }
        };

        if let Err(e) = tx.write_all(&buf[..len]).await {
            warn!("Failed to send draw frame: {:?}", e);
        } else {
            trace!("Draw frame {:#x} sent", frame.msg_type);
        }
    }
}
