//! Encryption table used by both the keyed hash and the block cipher
//!
//! The table is not a fixed literal: it is generated once at startup from a
//! small linear congruential generator, the same way the original archive
//! tool built it. Rows 0-3 (0x000-0x3FF) feed the keyed hash function; row 4
//! (0x400-0x4FF) feeds the block cipher. Both uses read from the same table,
//! so it is built once and shared.

use std::sync::OnceLock;

const TABLE_LEN: usize = 0x500;
const LCG_MODULUS: i64 = 0x2AAAAB;

fn build_table() -> [u32; TABLE_LEN] {
    let mut table = [0u32; TABLE_LEN];
    let mut r: i64 = 0x0010_0001;

    for i in 0..0x100usize {
        for j in 0..5usize {
            r = (r * 125 + 3) % LCG_MODULUS;
            let mut value = ((r as u32) & 0xFFFF) << 16;

            r = (r * 125 + 3) % LCG_MODULUS;
            value |= (r as u32) & 0xFFFF;

            table[0x100 * j + i] = value;
        }
    }

    table
}

static TABLE: OnceLock<[u32; TABLE_LEN]> = OnceLock::new();

/// The shared 5x256 encryption table, built on first use.
pub fn encryption_table() -> &'static [u32; TABLE_LEN] {
    TABLE.get_or_init(build_table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_deterministic() {
        let a = build_table();
        let b = build_table();
        assert_eq!(a, b);
    }

    #[test]
    fn table_rows_are_distinct() {
        let table = encryption_table();
        assert_ne!(table[0], table[0x100]);
        assert_ne!(table[0x100], table[0x400]);
    }
}
