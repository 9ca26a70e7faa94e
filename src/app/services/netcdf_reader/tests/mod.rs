//! Tests for the NetCDF classic reader
//!
//! Includes a small in-memory file builder that writes well-formed CDF-1
//! and CDF-2 byte streams, shared with the extraction and ingestion tests.


use crate::app::services::netcdf_reader::header::nc_type;
use byteorder::{BigEndian, WriteBytesExt};

/// Attribute payload supported by the builder
#[derive(Clone)]
pub enum BuilderAttr {
    Text(String),
    Double(f64),
}

struct BuilderVar {
    name: String,
    dim_ids: Vec<usize>,
    type_code: i32,
    attrs: Vec<(String, BuilderAttr)>,
    /// Raw big-endian element bytes, unpadded, records concatenated
    data: Vec<u8>,
}

/// Writes NetCDF classic byte streams for tests
pub struct NcFileBuilder {
    version: u8,
    dims: Vec<(String, usize, bool)>,
    vars: Vec<BuilderVar>,
}

impl NcFileBuilder {
    pub fn new() -> Self {
        NcFileBuilder {
            version: 1,
            dims: Vec::new(),
            vars: Vec::new(),
        }
    }

    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    /// Declare a fixed dimension, returning its id
    pub fn dim(&mut self, name: &str, len: usize) -> usize {
        self.dims.push((name.to_string(), len, false));
        self.dims.len() - 1
    }

    /// Declare the record (unlimited) dimension, returning its id
    pub fn record_dim(&mut self, name: &str) -> usize {
        self.dims.push((name.to_string(), 0, true));
        self.dims.len() - 1
    }

    pub fn var_double(&mut self, name: &str, dim_ids: &[usize], values: &[f64]) {
        let mut data = Vec::with_capacity(values.len() * 8);
        for &v in values {
            data.write_f64::<BigEndian>(v).unwrap();
        }
        self.push_var(name, dim_ids, nc_type::DOUBLE, data);
    }

    pub fn var_float(&mut self, name: &str, dim_ids: &[usize], values: &[f32]) {
        let mut data = Vec::with_capacity(values.len() * 4);
        for &v in values {
            data.write_f32::<BigEndian>(v).unwrap();
        }
        self.push_var(name, dim_ids, nc_type::FLOAT, data);
    }

    pub fn var_int(&mut self, name: &str, dim_ids: &[usize], values: &[i32]) {
        let mut data = Vec::with_capacity(values.len() * 4);
        for &v in values {
            data.write_i32::<BigEndian>(v).unwrap();
        }
        self.push_var(name, dim_ids, nc_type::INT, data);
    }

    pub fn var_char(&mut self, name: &str, dim_ids: &[usize], bytes: &[u8]) {
        self.push_var(name, dim_ids, nc_type::CHAR, bytes.to_vec());
    }

    /// Attach an attribute to the most recently declared variable
    pub fn attr(&mut self, name: &str, value: BuilderAttr) {
        if let Some(var) = self.vars.last_mut() {
            var.attrs.push((name.to_string(), value));
        }
    }

    /// Shorthand for the `_FillValue` attribute
    pub fn fill_value(&mut self, value: f64) {
        self.attr("_FillValue", BuilderAttr::Double(value));
    }

    fn push_var(&mut self, name: &str, dim_ids: &[usize], type_code: i32, data: Vec<u8>) {
        self.vars.push(BuilderVar {
            name: name.to_string(),
            dim_ids: dim_ids.to_vec(),
            type_code,
            attrs: Vec::new(),
            data,
        });
    }

    fn elem_size(type_code: i32) -> usize {
        nc_type::size_of(type_code).unwrap()
    }

    fn is_record(&self, var: &BuilderVar) -> bool {
        var.dim_ids.first().map(|&id| self.dims[id].2).unwrap_or(false)
    }

    fn per_record_bytes(&self, var: &BuilderVar) -> usize {
        let count: usize = var.dim_ids[1..].iter().map(|&id| self.dims[id].1).product();
        count * Self::elem_size(var.type_code)
    }

    fn fixed_bytes(&self, var: &BuilderVar) -> usize {
        let count: usize = var.dim_ids.iter().map(|&id| self.dims[id].1).product();
        count * Self::elem_size(var.type_code)
    }

    pub fn build(&self) -> Vec<u8> {
        let record_vars: Vec<usize> = (0..self.vars.len())
            .filter(|&i| self.is_record(&self.vars[i]))
            .collect();
        let num_records = record_vars
            .first()
            .map(|&i| {
                let per = self.per_record_bytes(&self.vars[i]).max(1);
                self.vars[i].data.len() / per
            })
            .unwrap_or(0);

        // First pass with zero offsets just to measure the header.
        let begins = vec![0u64; self.vars.len()];
        let header_len = self.serialize(num_records, &begins).len();

        // Fixed variables in declaration order, then the record section.
        let mut begins = vec![0u64; self.vars.len()];
        let mut offset = header_len as u64;
        for (i, var) in self.vars.iter().enumerate() {
            if !self.is_record(var) {
                begins[i] = offset;
                offset += pad4(self.fixed_bytes(var)) as u64;
            }
        }
        let single_record_var = record_vars.len() == 1;
        for &i in &record_vars {
            begins[i] = offset;
            let per = self.per_record_bytes(&self.vars[i]);
            offset += if single_record_var { per } else { pad4(per) } as u64;
        }

        let mut out = self.serialize(num_records, &begins);
        for (i, var) in self.vars.iter().enumerate() {
            if !self.is_record(var) {
                debug_assert_eq!(out.len() as u64, begins[i]);
                out.extend_from_slice(&var.data);
                out.resize(out.len() + pad4(var.data.len()) - var.data.len(), 0);
            }
        }
        for r in 0..num_records {
            for &i in &record_vars {
                let var = &self.vars[i];
                let per = self.per_record_bytes(var);
                let slab = &var.data[r * per..(r + 1) * per];
                out.extend_from_slice(slab);
                if !single_record_var {
                    out.resize(out.len() + pad4(per) - per, 0);
                }
            }
        }
        out
    }

    fn serialize(&self, num_records: usize, begins: &[u64]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"CDF");
        out.push(self.version);
        out.write_i32::<BigEndian>(num_records as i32).unwrap();

        // Dimension list
        if self.dims.is_empty() {
            out.write_i64::<BigEndian>(0).unwrap();
        } else {
            out.write_i32::<BigEndian>(0x0A).unwrap();
            out.write_i32::<BigEndian>(self.dims.len() as i32).unwrap();
            for (name, len, is_record) in &self.dims {
                write_name(&mut out, name);
                let stored = if *is_record { 0 } else { *len as i32 };
                out.write_i32::<BigEndian>(stored).unwrap();
            }
        }

        // No global attributes
        out.write_i64::<BigEndian>(0).unwrap();

        // Variable list
        if self.vars.is_empty() {
            out.write_i64::<BigEndian>(0).unwrap();
        } else {
            out.write_i32::<BigEndian>(0x0B).unwrap();
            out.write_i32::<BigEndian>(self.vars.len() as i32).unwrap();
            for (i, var) in self.vars.iter().enumerate() {
                write_name(&mut out, &var.name);
                out.write_i32::<BigEndian>(var.dim_ids.len() as i32).unwrap();
                for &id in &var.dim_ids {
                    out.write_i32::<BigEndian>(id as i32).unwrap();
                }
                write_attrs(&mut out, &var.attrs);
                out.write_i32::<BigEndian>(var.type_code).unwrap();
                let vsize = if self.is_record(var) {
                    pad4(self.per_record_bytes(var))
                } else {
                    pad4(self.fixed_bytes(var))
                };
                out.write_i32::<BigEndian>(vsize as i32).unwrap();
                if self.version == 1 {
                    out.write_i32::<BigEndian>(begins[i] as i32).unwrap();
                } else {
                    out.write_i64::<BigEndian>(begins[i] as i64).unwrap();
                }
            }
        }
        out
    }
}

fn pad4(n: usize) -> usize {
    (n + 3) & !3
}

fn write_name(out: &mut Vec<u8>, name: &str) {
    out.write_i32::<BigEndian>(name.len() as i32).unwrap();
    out.extend_from_slice(name.as_bytes());
    out.resize(out.len() + pad4(name.len()) - name.len(), 0);
}

fn write_attrs(out: &mut Vec<u8>, attrs: &[(String, BuilderAttr)]) {
    if attrs.is_empty() {
        out.write_i64::<BigEndian>(0).unwrap();
        return;
    }
    out.write_i32::<BigEndian>(0x0C).unwrap();
    out.write_i32::<BigEndian>(attrs.len() as i32).unwrap();
    for (name, value) in attrs {
        write_name(out, name);
        match value {
            BuilderAttr::Text(text) => {
                out.write_i32::<BigEndian>(nc_type::CHAR).unwrap();
                out.write_i32::<BigEndian>(text.len() as i32).unwrap();
                out.extend_from_slice(text.as_bytes());
                out.resize(out.len() + pad4(text.len()) - text.len(), 0);
            }
            BuilderAttr::Double(v) => {
                out.write_i32::<BigEndian>(nc_type::DOUBLE).unwrap();
                out.write_i32::<BigEndian>(1).unwrap();
                out.write_f64::<BigEndian>(*v).unwrap();
            }
        }
    }
}

/// Build a small two-profile ARGO file used across the test suite
///
/// Profile 0 has three levels with one bad salinity flag; profile 1 has
/// three levels where the deepest pressure is the fill value.
pub fn sample_argo_file() -> Vec<u8> {
    let mut b = NcFileBuilder::new();
    let n_prof = b.dim("N_PROF", 2);
    let n_levels = b.dim("N_LEVELS", 3);
    let string8 = b.dim("STRING8", 8);

    b.var_double(
        "PRES",
        &[n_prof, n_levels],
        &[5.0, 100.0, 1000.0, 10.0, 200.0, 99999.0],
    );
    b.fill_value(99999.0);
    b.var_double(
        "TEMP",
        &[n_prof, n_levels],
        &[28.4561, 22.1042, 4.3219, 27.0, 18.5, 3.2],
    );
    b.fill_value(99999.0);
    b.var_double(
        "PSAL",
        &[n_prof, n_levels],
        &[34.2114, 35.0287, 34.6831, 34.5, 35.1, 34.7],
    );
    b.fill_value(99999.0);

    b.var_char("PRES_QC", &[n_prof, n_levels], b"111111");
    b.var_char("TEMP_QC", &[n_prof, n_levels], b"112111");
    b.var_char("PSAL_QC", &[n_prof, n_levels], b"114 11");

    b.var_double("LATITUDE", &[n_prof], &[-2.5, 45.0]);
    b.var_double("LONGITUDE", &[n_prof], &[156.2, 210.0]);
    // 2023-03-15T06:00 and 2024-01-02T12:00 as days since 1950-01-01
    b.var_double("JULD", &[n_prof], &[26736.25, 27029.5]);
    b.var_int("CYCLE_NUMBER", &[n_prof], &[42, 7]);
    b.var_char("PLATFORM_NUMBER", &[n_prof, string8], b"5904471 2902746 ");

    b.build()
}
