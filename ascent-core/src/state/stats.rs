//! Companion link counters

use super::events::LinkFailure;

/// Running totals for the companion link
///
/// Counters saturate rather than wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// Outbound messages the companion accepted
    pub sent: u32,
    /// Outbound messages refused or never acknowledged
    pub failed: u32,
    /// Inbound messages lost or malformed
    pub inbound_dropped: u32,
    /// Weather requests skipped because the outbox was busy
    pub requests_dropped: u32,
    /// Inbound messages applied
    pub applied: u32,
    /// Most recent failure in either direction
    pub last_failure: Option<LinkFailure>,
}

impl LinkStats {
    pub fn record_sent(&mut self) {
        self.sent = self.sent.saturating_add(1);
    }

    pub fn record_failed(&mut self, failure: LinkFailure) {
        self.failed = self.failed.saturating_add(1);
        self.last_failure = Some(failure);
    }

    pub fn record_inbound_dropped(&mut self, failure: LinkFailure) {
        self.inbound_dropped = self.inbound_dropped.saturating_add(1);
        self.last_failure = Some(failure);
    }

    pub fn record_request_dropped(&mut self) {
        self.requests_dropped = self.requests_dropped.saturating_add(1);
    }

    pub fn record_applied(&mut self) {
        self.applied = self.applied.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = LinkStats::default();
        stats.record_sent();
        stats.record_failed(LinkFailure::AckTimeout);
        stats.record_inbound_dropped(LinkFailure::Overflow);
        stats.record_request_dropped();

        assert_eq!(stats.sent, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.inbound_dropped, 1);
        assert_eq!(stats.requests_dropped, 1);
        assert_eq!(stats.last_failure, Some(LinkFailure::Overflow));
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = LinkStats {
            sent: u32::MAX,
            ..Default::default()
        };
        stats.record_sent();
        assert_eq!(stats.sent, u32::MAX);
    }
}
