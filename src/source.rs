// Byte sources and the bank-aware address cursor.
//
// Every codec in this crate reads its input through the `ByteSource`
// capability: a read-only byte lookup by 24-bit-style address. The
// address-to-image mapping itself (LoROM folding, header skipping, asset
// catalogs) belongs to the embedding layer; the codecs only ever see
// `get_byte`.
//
// Sequential reads go through `AddressCursor`, which applies the bank
// discipline of the source image: whenever an increment lands on a 64 KiB
// boundary, the cursor skips forward by half a bank so that a run of reads
// stays inside the valid half of each bank.

// ---------------------------------------------------------------------------
// Byte source trait
// ---------------------------------------------------------------------------

/// Half the 16-bit addressable range; the skip applied when a sequential
/// read crosses a bank boundary.
pub const BANK_SKIP: u32 = 0x8000;

/// Read-only random access to the bytes of a source image.
///
/// `None` means the address falls outside the backing data. The codecs
/// treat that as stream truncation, so a bounded in-memory source doubles
/// as the overrun guard for command streams that are missing their
/// terminator.
pub trait ByteSource {
    /// The byte at `addr`, or `None` when `addr` is out of range.
    fn get_byte(&self, addr: u32) -> Option<u8>;
}

/// Flat in-memory source: the address is the index.
impl ByteSource for [u8] {
    #[inline(always)]
    fn get_byte(&self, addr: u32) -> Option<u8> {
        self.get(addr as usize).copied()
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &S {
    #[inline(always)]
    fn get_byte(&self, addr: u32) -> Option<u8> {
        (**self).get_byte(addr)
    }
}

// ---------------------------------------------------------------------------
// Address cursor
// ---------------------------------------------------------------------------

/// Sequential byte reader over a [`ByteSource`].
///
/// Advancing past an address whose low 16 bits wrap to zero skips the
/// cursor forward by [`BANK_SKIP`] into the next bank region. Created per
/// decode call; the final address is how the decompressor reports consumed
/// length.
#[derive(Debug, Clone)]
pub struct AddressCursor<'a, S: ?Sized> {
    source: &'a S,
    addr: u32,
}

impl<'a, S: ByteSource + ?Sized> AddressCursor<'a, S> {
    /// Create a cursor positioned at `addr`.
    pub fn new(source: &'a S, addr: u32) -> Self {
        Self { source, addr }
    }

    /// The address of the next byte to be read.
    #[inline]
    pub fn address(&self) -> u32 {
        self.addr
    }
}

impl<S: ByteSource + ?Sized> Iterator for AddressCursor<'_, S> {
    type Item = u8;

    /// Read one byte and advance, applying the bank-skip rule.
    ///
    /// Source exhaustion (`None`) leaves the cursor where it was, so the
    /// reported address still points at the byte that could not be read.
    #[inline]
    fn next(&mut self) -> Option<u8> {
        let byte = self.source.get_byte(self.addr)?;
        self.addr = self.addr.wrapping_add(1);
        if self.addr & 0xFFFF == 0 {
            self.addr = self.addr.wrapping_add(BANK_SKIP);
        }
        Some(byte)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
