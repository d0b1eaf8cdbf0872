//! Companion UART transmit task
//!
//! Sends one outbound message at a time and waits for the companion's
//! verdict. The outcome goes back to the controller as an event; nothing is
//! retried.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{with_timeout, Duration};
use embedded_io_async::Write;

use ascent_core::state::{Event, LinkFailure};
use ascent_core::weather::OutboundMessage;
use ascent_protocol::frame::MAX_FRAME_SIZE;

use crate::channels::{LinkVerdict, EVENT_CHANNEL, LINK_VERDICT, OUTBOX, OUTBOX_BUSY};

/// How long the companion has to answer
const ACK_TIMEOUT: Duration = Duration::from_secs(5);

/// Companion TX task - delivers outbox messages
#[embassy_executor::task]
pub async fn companion_tx_task(mut tx: BufferedUartTx) {
    info!("Companion TX task started");

    let mut seq: u8 = 0;

    loop {
        let message = OUTBOX.receive().await;
        seq = seq.wrapping_add(1);

        let event = match deliver(&mut tx, &message, seq).await {
            Ok(()) => Event::OutboxSent,
            Err(failure) => Event::OutboxFailed(failure),
        };

        OUTBOX_BUSY.store(false, Ordering::Release);
        EVENT_CHANNEL.send(event).await;
    }
}

async fn deliver(
    tx: &mut BufferedUartTx,
    message: &OutboundMessage,
    seq: u8,
) -> Result<(), LinkFailure> {
    let frame = message.as_wire().to_frame(seq).map_err(LinkFailure::Frame)?;

    let mut buf = [0u8; MAX_FRAME_SIZE];
    let len = frame.encode(&mut buf).map_err(LinkFailure::Frame)?;

    // Drop any verdict left over from an earlier message
    LINK_VERDICT.reset();

    if let Err(e) = tx.write_all(&buf[..len]).await {
        // Nothing reached the companion, so no verdict will come
        warn!("Failed to send request {}: {:?}", seq, e);
        return Err(LinkFailure::AckTimeout);
    }
    debug!("Weather request {} sent", seq);

    match with_timeout(ACK_TIMEOUT, wait_verdict(seq)).await {
        Ok(LinkVerdict::Ack { .. }) => Ok(()),
        Ok(LinkVerdict::Nack { reason, .. }) => Err(LinkFailure::Nack(reason)),
        Err(_) => Err(LinkFailure::AckTimeout),
    }
}

/// Wait for the verdict on `seq`, skipping stale ones
async fn wait_verdict(seq: u8) -> LinkVerdict {
    loop {
        let verdict = LINK_VERDICT.wait().await;
        if verdict.seq() == seq {
            return verdict;
        }
        trace!("Ignoring verdict for {}", verdict.seq());
    }
}
