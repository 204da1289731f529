//! One-way readiness gate holding at most one deferred switch request.

use crate::error::{I18nError, I18nResult};
use crate::locale::LocaleTag;

/// Tracks whether the loader is usable and buffers the latest early request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReadinessGate {
    /// Loader not ready; the most recent request waits here.
    NotReady {
        /// Latest request issued before readiness.
        pending: Option<LocaleTag>,
    },
    /// Loader initialized; requests go straight through.
    Ready,
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self::NotReady { pending: None }
    }
}

impl ReadinessGate {
    /// Closed gate with nothing pending.
    #[must_use]
    pub const fn new() -> Self {
        Self::NotReady { pending: None }
    }

    /// Whether the gate has opened.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Request currently waiting for readiness.
    #[must_use]
    pub const fn pending(&self) -> Option<&LocaleTag> {
        match self {
            Self::NotReady { pending } => pending.as_ref(),
            Self::Ready => None,
        }
    }

    /// Buffer `locale`, returning the request it displaced.
    ///
    /// Returns `Err(locale)` unchanged when the gate is already open so the
    /// caller can route the request directly.
    ///
    /// # Errors
    ///
    /// Hands the request back when the gate is open.
    pub const fn hold(&mut self, locale: LocaleTag) -> Result<Option<LocaleTag>, LocaleTag> {
        match self {
            Self::NotReady { pending } => Ok(pending.replace(locale)),
            Self::Ready => Err(locale),
        }
    }

    /// Open the gate, yielding the buffered request.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::GateAlreadyOpen`] on a second call; the gate never
    /// closes again.
    pub fn open(&mut self) -> I18nResult<Option<LocaleTag>> {
        match std::mem::replace(self, Self::Ready) {
            Self::NotReady { pending } => Ok(pending),
            Self::Ready => Err(I18nError::GateAlreadyOpen),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_requests_overwrite_earlier_ones() {
        let mut gate = ReadinessGate::new();
        assert_eq!(gate.hold(LocaleTag::from("fr")), Ok(None));
        assert_eq!(
            gate.hold(LocaleTag::from("es")),
            Ok(Some(LocaleTag::from("fr")))
        );
        assert_eq!(gate.pending(), Some(&LocaleTag::from("es")));
    }

    #[test]
    fn opening_yields_latest_request_once() -> I18nResult<()> {
        let mut gate = ReadinessGate::default();
        let _ = gate.hold(LocaleTag::from("fr"));
        let _ = gate.hold(LocaleTag::from("es"));
        assert_eq!(gate.open()?, Some(LocaleTag::from("es")));
        assert!(gate.is_ready());
        assert_eq!(gate.pending(), None);
        assert_eq!(gate.open(), Err(I18nError::GateAlreadyOpen));
        assert!(gate.is_ready());
        Ok(())
    }

    #[test]
    fn open_gate_hands_requests_back() -> I18nResult<()> {
        let mut gate = ReadinessGate::new();
        assert_eq!(gate.open()?, None);
        assert_eq!(
            gate.hold(LocaleTag::from("pt-BR")),
            Err(LocaleTag::from("pt-BR"))
        );
        Ok(())
    }
}
