//! NetCDF classic header parsing
//!
//! Implements the CDF-1/CDF-2 header grammar: magic, record count,
//! dimension list, global attribute list and variable list, all big-endian
//! with 4-byte alignment padding.

use crate::{Error, Result};
use byteorder::{BigEndian, ReadBytesExt};
use std::io::{Cursor, Read};

/// External type codes used in the classic format
pub mod nc_type {
    pub const BYTE: i32 = 1;
    pub const CHAR: i32 = 2;
    pub const SHORT: i32 = 3;
    pub const INT: i32 = 4;
    pub const FLOAT: i32 = 5;
    pub const DOUBLE: i32 = 6;

    /// Size in bytes of one element of the given type
    pub fn size_of(code: i32) -> Option<usize> {
        match code {
            BYTE | CHAR => Some(1),
            SHORT => Some(2),
            INT | FLOAT => Some(4),
            DOUBLE => Some(8),
            _ => None,
        }
    }
}

// List tags preceding each header section
const TAG_DIMENSION: i32 = 0x0A;
const TAG_VARIABLE: i32 = 0x0B;
const TAG_ATTRIBUTE: i32 = 0x0C;
const TAG_ABSENT: i32 = 0x00;

/// A named dimension; the record dimension has `is_record` set
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub name: String,
    pub len: usize,
    pub is_record: bool,
}

/// Attribute payload, text or numeric
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Numeric(Vec<f64>),
}

/// A global or per-variable attribute
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: AttrValue,
}

/// A variable description from the header
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub dim_ids: Vec<usize>,
    pub attributes: Vec<Attribute>,
    pub nc_type: i32,
    pub vsize: usize,
    pub begin: u64,
}

impl Variable {
    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// The declared fill value, when numeric and present
    pub fn fill_value(&self) -> Option<f64> {
        match self.attribute("_FillValue").map(|a| &a.value) {
            Some(AttrValue::Numeric(vals)) => vals.first().copied(),
            _ => None,
        }
    }
}

/// Parsed file header
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// Format version byte, 1 (CDF-1) or 2 (CDF-2)
    pub version: u8,
    /// Number of records along the unlimited dimension
    pub num_records: usize,
    pub dimensions: Vec<Dimension>,
    pub attributes: Vec<Attribute>,
    pub variables: Vec<Variable>,
}

impl Header {
    /// Parse the header from the start of a classic-format file
    ///
    /// `origin` names the source (usually the file path) for error messages.
    pub fn parse(data: &[u8], origin: &str) -> Result<Self> {
        let mut cursor = Cursor::new(data);

        let mut magic = [0u8; 4];
        cursor
            .read_exact(&mut magic)
            .map_err(|_| Error::invalid_file(origin, "File too short for NetCDF magic"))?;
        if &magic[0..3] != b"CDF" {
            return Err(Error::invalid_file(
                origin,
                "Not a NetCDF classic file (missing CDF magic)",
            ));
        }
        let version = magic[3];
        if version != 1 && version != 2 {
            return Err(Error::invalid_file(
                origin,
                format!(
                    "Unsupported NetCDF format version {} (only CDF-1 and CDF-2 are supported)",
                    version
                ),
            ));
        }

        let num_records = read_i32(&mut cursor, origin)?;
        if num_records < 0 {
            return Err(Error::invalid_file(
                origin,
                "Streaming record count is not supported",
            ));
        }
        let num_records = num_records as usize;

        let dimensions = parse_dim_list(&mut cursor, origin)?;
        let attributes = parse_attr_list(&mut cursor, origin)?;
        let variables = parse_var_list(&mut cursor, origin, version, &dimensions)?;

        Ok(Header {
            version,
            num_records,
            dimensions,
            attributes,
            variables,
        })
    }

    /// Look up a dimension index by name
    pub fn dim_id(&self, name: &str) -> Option<usize> {
        self.dimensions.iter().position(|d| d.name == name)
    }

    /// Look up a variable by name
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// True when the variable's first dimension is the record dimension
    pub fn is_record_var(&self, var: &Variable) -> bool {
        var.dim_ids
            .first()
            .map(|&id| self.dimensions[id].is_record)
            .unwrap_or(false)
    }

    /// Effective length of a variable dimension, resolving the record dim
    pub fn resolved_dim_len(&self, dim_id: usize) -> usize {
        let dim = &self.dimensions[dim_id];
        if dim.is_record {
            self.num_records
        } else {
            dim.len
        }
    }

    /// Bytes occupied by one record across all record variables
    ///
    /// Per the classic format, each record variable contributes its
    /// per-record size padded to 4 bytes, except that a file with exactly
    /// one record variable uses that variable's unpadded size.
    pub fn record_size(&self) -> u64 {
        let record_vars: Vec<&Variable> = self
            .variables
            .iter()
            .filter(|v| self.is_record_var(v))
            .collect();

        match record_vars.as_slice() {
            [] => 0,
            [single] => self.per_record_bytes(single) as u64,
            many => many
                .iter()
                .map(|v| pad4(self.per_record_bytes(v)) as u64)
                .sum(),
        }
    }

    /// Unpadded bytes of one record of the given record variable
    pub fn per_record_bytes(&self, var: &Variable) -> usize {
        let elem = nc_type::size_of(var.nc_type).unwrap_or(1);
        let count: usize = var.dim_ids[1..]
            .iter()
            .map(|&id| self.dimensions[id].len)
            .product();
        count * elem
    }
}

fn pad4(n: usize) -> usize {
    (n + 3) & !3
}

fn read_i32(cursor: &mut Cursor<&[u8]>, origin: &str) -> Result<i32> {
    cursor
        .read_i32::<BigEndian>()
        .map_err(|_| Error::invalid_file(origin, "Truncated header"))
}

fn read_i64(cursor: &mut Cursor<&[u8]>, origin: &str) -> Result<i64> {
    cursor
        .read_i64::<BigEndian>()
        .map_err(|_| Error::invalid_file(origin, "Truncated header"))
}

/// Read a length-prefixed name with trailing padding to 4 bytes
fn read_name(cursor: &mut Cursor<&[u8]>, origin: &str) -> Result<String> {
    let len = read_i32(cursor, origin)?;
    if len < 0 {
        return Err(Error::invalid_file(origin, "Negative name length"));
    }
    let padded = pad4(len as usize);
    let mut buf = vec![0u8; padded];
    cursor
        .read_exact(&mut buf)
        .map_err(|_| Error::invalid_file(origin, "Truncated name"))?;
    buf.truncate(len as usize);
    String::from_utf8(buf)
        .map_err(|_| Error::invalid_file(origin, "Name is not valid UTF-8"))
}

/// Read a list tag and element count; an absent list is two zero words
fn read_list_header(cursor: &mut Cursor<&[u8]>, origin: &str, expected_tag: i32) -> Result<usize> {
    let tag = read_i32(cursor, origin)?;
    let count = read_i32(cursor, origin)?;
    if tag == TAG_ABSENT && count == 0 {
        return Ok(0);
    }
    if tag != expected_tag || count < 0 {
        return Err(Error::invalid_file(
            origin,
            format!("Malformed header list (tag 0x{:02X})", tag),
        ));
    }
    Ok(count as usize)
}

fn parse_dim_list(cursor: &mut Cursor<&[u8]>, origin: &str) -> Result<Vec<Dimension>> {
    let count = read_list_header(cursor, origin, TAG_DIMENSION)?;
    let mut dims = Vec::with_capacity(count);
    for _ in 0..count {
        let name = read_name(cursor, origin)?;
        let len = read_i32(cursor, origin)?;
        if len < 0 {
            return Err(Error::invalid_file(origin, "Negative dimension length"));
        }
        dims.push(Dimension {
            name,
            len: len as usize,
            is_record: len == 0,
        });
    }
    Ok(dims)
}

fn parse_attr_list(cursor: &mut Cursor<&[u8]>, origin: &str) -> Result<Vec<Attribute>> {
    let count = read_list_header(cursor, origin, TAG_ATTRIBUTE)?;
    let mut attrs = Vec::with_capacity(count);
    for _ in 0..count {
        let name = read_name(cursor, origin)?;
        let type_code = read_i32(cursor, origin)?;
        let nelems = read_i32(cursor, origin)?;
        if nelems < 0 {
            return Err(Error::invalid_file(origin, "Negative attribute length"));
        }
        let nelems = nelems as usize;
        let elem_size = nc_type::size_of(type_code).ok_or_else(|| {
            Error::invalid_file(origin, format!("Unknown attribute type {}", type_code))
        })?;
        let padded = pad4(nelems * elem_size);
        let mut buf = vec![0u8; padded];
        cursor
            .read_exact(&mut buf)
            .map_err(|_| Error::invalid_file(origin, "Truncated attribute value"))?;
        buf.truncate(nelems * elem_size);

        let value = decode_attr_value(type_code, nelems, &buf);
        attrs.push(Attribute { name, value });
    }
    Ok(attrs)
}

fn decode_attr_value(type_code: i32, nelems: usize, bytes: &[u8]) -> AttrValue {
    match type_code {
        nc_type::CHAR => {
            let text: String = bytes
                .iter()
                .map(|&b| b as char)
                .collect::<String>()
                .trim_end_matches(|c: char| c == '\0' || c == ' ')
                .to_string();
            AttrValue::Text(text)
        }
        _ => {
            let mut cursor = Cursor::new(bytes);
            let mut values = Vec::with_capacity(nelems);
            for _ in 0..nelems {
                let v = match type_code {
                    nc_type::BYTE => cursor.read_i8().map(f64::from),
                    nc_type::SHORT => cursor.read_i16::<BigEndian>().map(f64::from),
                    nc_type::INT => cursor.read_i32::<BigEndian>().map(f64::from),
                    nc_type::FLOAT => cursor.read_f32::<BigEndian>().map(f64::from),
                    nc_type::DOUBLE => cursor.read_f64::<BigEndian>(),
                    _ => break,
                };
                match v {
                    Ok(v) => values.push(v),
                    Err(_) => break,
                }
            }
            AttrValue::Numeric(values)
        }
    }
}

fn parse_var_list(
    cursor: &mut Cursor<&[u8]>,
    origin: &str,
    version: u8,
    dimensions: &[Dimension],
) -> Result<Vec<Variable>> {
    let count = read_list_header(cursor, origin, TAG_VARIABLE)?;
    let mut vars = Vec::with_capacity(count);
    for _ in 0..count {
        let name = read_name(cursor, origin)?;
        let ndims = read_i32(cursor, origin)?;
        if ndims < 0 {
            return Err(Error::invalid_file(origin, "Negative dimension count"));
        }
        let mut dim_ids = Vec::with_capacity(ndims as usize);
        for _ in 0..ndims {
            let id = read_i32(cursor, origin)?;
            if id < 0 || id as usize >= dimensions.len() {
                return Err(Error::invalid_file(
                    origin,
                    format!("Variable '{}' references unknown dimension {}", name, id),
                ));
            }
            dim_ids.push(id as usize);
        }
        let attributes = parse_attr_list(cursor, origin)?;
        let type_code = read_i32(cursor, origin)?;
        if nc_type::size_of(type_code).is_none() {
            return Err(Error::invalid_file(
                origin,
                format!("Variable '{}' has unknown type {}", name, type_code),
            ));
        }
        let vsize = read_i32(cursor, origin)?;
        let begin = match version {
            1 => read_i32(cursor, origin)? as u64,
            _ => read_i64(cursor, origin)? as u64,
        };
        vars.push(Variable {
            name,
            dim_ids,
            attributes,
            nc_type: type_code,
            vsize: vsize.max(0) as usize,
            begin,
        });
    }
    Ok(vars)
}
