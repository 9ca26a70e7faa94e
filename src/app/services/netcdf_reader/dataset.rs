//! Random access to NetCDF classic variable data
//!
//! [`RawDataset`] owns the file bytes plus the parsed header and serves
//! per-profile slices of the variables the extraction pipeline needs.
//! ARGO profile files are small enough that reading them whole is the
//! simplest correct approach.

use super::header::{nc_type, Header, Variable};
use crate::constants::quality_flags;
use crate::{Error, Result};
use byteorder::{BigEndian, ReadBytesExt};
use std::io::Cursor;
use std::path::Path;

/// A loaded NetCDF classic file
#[derive(Debug)]
pub struct RawDataset {
    origin: String,
    data: Vec<u8>,
    header: Header,
    record_size: u64,
}

impl RawDataset {
    /// Read and parse a NetCDF classic file from disk
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }
        let data = std::fs::read(path)?;
        Self::from_bytes(data, &path.display().to_string())
    }

    /// Parse a NetCDF classic file already held in memory
    pub fn from_bytes(data: Vec<u8>, origin: &str) -> Result<Self> {
        let header = Header::parse(&data, origin)?;
        let record_size = header.record_size();
        Ok(RawDataset {
            origin: origin.to_string(),
            data,
            header,
            record_size,
        })
    }

    /// Source path or label this dataset was loaded from
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Parsed header, for callers that need dimension or attribute detail
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Length of a named dimension; the record dimension reports the
    /// current record count
    pub fn dim_len(&self, name: &str) -> Option<usize> {
        self.header
            .dim_id(name)
            .map(|id| self.header.resolved_dim_len(id))
    }

    /// True when the file declares a variable with this name
    pub fn has_variable(&self, name: &str) -> bool {
        self.header.variable(name).is_some()
    }

    /// Names of all declared variables
    pub fn variable_names(&self) -> Vec<&str> {
        self.header.variables.iter().map(|v| v.name.as_str()).collect()
    }

    /// Read one profile's numeric values from a variable
    ///
    /// The first dimension indexes profiles; the remaining dimensions are
    /// flattened into the returned vector. Fill values become NaN.
    pub fn row_f64(&self, name: &str, index: usize) -> Result<Vec<f64>> {
        let var = self.variable(name)?;
        if var.nc_type == nc_type::CHAR {
            return Err(Error::invalid_file(
                &self.origin,
                format!("Variable '{}' is character data, not numeric", name),
            ));
        }
        let (offset, count) = self.slab(var, index)?;
        self.read_numeric(var, offset, count)
    }

    /// Read a single numeric value from a 1-D variable
    pub fn scalar_f64(&self, name: &str, index: usize) -> Result<f64> {
        let values = self.row_f64(name, index)?;
        values.first().copied().ok_or_else(|| {
            Error::invalid_file(
                &self.origin,
                format!("Variable '{}' has no value at index {}", name, index),
            )
        })
    }

    /// Read one profile's character string, trimmed of padding
    pub fn string_at(&self, name: &str, index: usize) -> Result<String> {
        let var = self.variable(name)?;
        if var.nc_type != nc_type::CHAR {
            return Err(Error::invalid_file(
                &self.origin,
                format!("Variable '{}' is not character data", name),
            ));
        }
        let (offset, count) = self.slab(var, index)?;
        let bytes = self.bytes_at(offset, count)?;
        Ok(bytes
            .iter()
            .map(|&b| b as char)
            .collect::<String>()
            .trim_matches(|c: char| c == '\0' || c == ' ')
            .to_string())
    }

    /// Read one profile's QC flags as integers
    ///
    /// ARGO QC variables are character arrays of ASCII digits; blanks and
    /// unparseable characters read as the missing flag. Numeric QC
    /// variables are accepted too.
    pub fn qc_row(&self, name: &str, index: usize) -> Result<Vec<i32>> {
        let var = self.variable(name)?;
        if var.nc_type == nc_type::CHAR {
            let (offset, count) = self.slab(var, index)?;
            let bytes = self.bytes_at(offset, count)?;
            Ok(bytes
                .iter()
                .map(|&b| {
                    if b.is_ascii_digit() {
                        (b - b'0') as i32
                    } else {
                        quality_flags::MISSING
                    }
                })
                .collect())
        } else {
            let values = self.row_f64(name, index)?;
            Ok(values
                .iter()
                .map(|&v| {
                    if v.is_finite() {
                        v as i32
                    } else {
                        quality_flags::MISSING
                    }
                })
                .collect())
        }
    }

    fn variable(&self, name: &str) -> Result<&Variable> {
        self.header.variable(name).ok_or_else(|| {
            Error::invalid_file(&self.origin, format!("Missing variable '{}'", name))
        })
    }

    /// Byte offset and element count of one first-dimension slice
    fn slab(&self, var: &Variable, index: usize) -> Result<(u64, usize)> {
        let elem_size = nc_type::size_of(var.nc_type).unwrap_or(1);

        if var.dim_ids.is_empty() {
            if index != 0 {
                return Err(self.index_error(var, index));
            }
            return Ok((var.begin, 1));
        }

        let first_len = self.header.resolved_dim_len(var.dim_ids[0]);
        if index >= first_len {
            return Err(self.index_error(var, index));
        }

        let count: usize = var.dim_ids[1..]
            .iter()
            .map(|&id| self.header.resolved_dim_len(id))
            .product();

        let offset = if self.header.is_record_var(var) {
            var.begin + index as u64 * self.record_size
        } else {
            var.begin + (index * count * elem_size) as u64
        };
        Ok((offset, count))
    }

    fn index_error(&self, var: &Variable, index: usize) -> Error {
        Error::invalid_file(
            &self.origin,
            format!("Index {} out of range for variable '{}'", index, var.name),
        )
    }

    fn bytes_at(&self, offset: u64, count: usize) -> Result<&[u8]> {
        let start = offset as usize;
        let end = start.checked_add(count).unwrap_or(usize::MAX);
        self.data.get(start..end).ok_or_else(|| {
            Error::invalid_file(&self.origin, "Variable data extends past end of file")
        })
    }

    fn read_numeric(&self, var: &Variable, offset: u64, count: usize) -> Result<Vec<f64>> {
        let elem_size = nc_type::size_of(var.nc_type).unwrap_or(1);
        let bytes = self.bytes_at(offset, count * elem_size)?;
        let mut cursor = Cursor::new(bytes);
        let fill = var.fill_value();

        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            let v = match var.nc_type {
                nc_type::BYTE => cursor.read_i8().map(f64::from),
                nc_type::SHORT => cursor.read_i16::<BigEndian>().map(f64::from),
                nc_type::INT => cursor.read_i32::<BigEndian>().map(f64::from),
                nc_type::FLOAT => cursor.read_f32::<BigEndian>().map(f64::from),
                nc_type::DOUBLE => cursor.read_f64::<BigEndian>(),
                other => {
                    return Err(Error::invalid_file(
                        &self.origin,
                        format!("Variable '{}' has unreadable type {}", var.name, other),
                    ))
                }
            }
            .map_err(|_| {
                Error::invalid_file(&self.origin, "Variable data extends past end of file")
            })?;

            let v = match fill {
                Some(f) if v == f => f64::NAN,
                _ => v,
            };
            values.push(v);
        }
        Ok(values)
    }
}
