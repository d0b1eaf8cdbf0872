//! Settings storage trait

/// Errors from the settings storage slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Nothing has been stored yet
    NotFound,
    /// Stored data does not fit the read buffer
    BufferTooSmall,
    /// The backing store refused the operation
    Io,
}

/// A single durable slot holding the encoded settings record
pub trait SettingsStorage {
    /// Read the stored bytes into `buffer`, returning their length
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StorageError>;

    /// Replace the stored bytes
    fn write(&mut self, data: &[u8]) -> Result<(), StorageError>;
}
