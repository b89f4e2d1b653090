//! Ledger adapters

mod memory;
mod snapshot;

pub use memory::InMemoryLedger;

#[cfg(test)]
pub(crate) use failing::{FailingLedger, FailureMode};

#[cfg(test)]
mod failing {
    use async_trait::async_trait;

    use crate::domain::{Ledger, LedgerScan};
    use crate::shared::LedgerError;

    #[derive(Debug, Clone, Copy)]
    pub(crate) enum FailureMode {
        Read,
        /// Reads see an empty ledger; only `put` fails.
        Write,
        Unavailable,
    }

    /// Ledger that fails according to its mode, for error-propagation tests.
    pub(crate) struct FailingLedger(pub FailureMode);

    impl FailingLedger {
        fn error(&self) -> LedgerError {
            match self.0 {
                FailureMode::Read => LedgerError::Read("disk gone".into()),
                FailureMode::Write => LedgerError::Write("disk full".into()),
                FailureMode::Unavailable => LedgerError::Unavailable("peer offline".into()),
            }
        }
    }

    #[async_trait]
    impl Ledger for FailingLedger {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
            match self.0 {
                FailureMode::Write => Ok(None),
                _ => Err(self.error()),
            }
        }

        async fn put(&self, _key: &str, _value: Vec<u8>) -> Result<(), LedgerError> {
            Err(self.error())
        }

        async fn range_scan(&self, _start: &str, _end: &str) -> Result<LedgerScan, LedgerError> {
            match self.0 {
                FailureMode::Write => Ok(Box::new(std::iter::empty())),
                _ => Err(self.error()),
            }
        }
    }
}
