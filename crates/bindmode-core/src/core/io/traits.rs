use super::pdbqt::RawStructure;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading atom records from a structure file format.
///
/// Implementors only tokenize records; building a [`Molecule`](crate::core::models::molecule::Molecule)
/// from them is left to [`load_molecule`](super::load_molecule).
pub trait StructureFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads atom records from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Return
    ///
    /// Returns the records of the first model together with any skipped lines.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or no valid atom record is found.
    fn read_from(reader: &mut impl BufRead) -> Result<RawStructure, Self::Error>;

    /// Reads atom records from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<RawStructure, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}
