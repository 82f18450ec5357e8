//! Unique table for hash-consing.
//!
//! Values live in a dense `Vec`, addressed by their index, which never changes.
//! Hashed values are additionally linked into bucket chains:
//!
//! ```text
//! buckets[h] → entry i → entry j → ... → 0
//! ```
//!
//! Index `0` doubles as the end-of-chain marker, so the first slot must be taken by
//! an unhashed value (see [`Table::add`]) before anything is [put][Table::put].
//! When the number of entries exceeds the number of buckets, the bucket array is
//! doubled and the chains are rebuilt. Entries are never removed.

use std::ops::Index;

use crate::utils::MyHash;

#[derive(Clone)]
struct Entry<T> {
    value: T,
    next: usize,
    /// Whether the entry takes part in the bucket chains.
    hashed: bool,
}

pub struct Table<T> {
    data: Vec<Entry<T>>,
    buckets: Vec<usize>,
    bitmask: u64,
}

impl<T> Table<T> {
    /// Create a new table with `2^bits` initial buckets.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Table bits should be in the range 0..=31");

        let size = 1 << bits;
        Self {
            data: Vec::with_capacity(size),
            buckets: vec![0; size],
            bitmask: (size - 1) as u64,
        }
    }

    /// Get the number of values in the table.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the number of buckets.
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Get the reference to the value at the given index.
    pub fn value(&self, index: usize) -> &T {
        &self.data[index].value
    }

    /// Add a value without registering it in the hash chains and return its index.
    pub fn add(&mut self, value: T) -> usize {
        self.push(value, false)
    }

    fn push(&mut self, value: T, hashed: bool) -> usize {
        let index = self.data.len();
        assert!(index <= u32::MAX as usize, "Node store is full");
        self.data.push(Entry {
            value,
            next: 0,
            hashed,
        });
        index
    }
}

impl<T> Table<T>
where
    T: MyHash,
{
    fn bucket_index(&self, value: &T) -> usize {
        (value.hash() & self.bitmask) as usize
    }

    /// Put a value into the table and return its index.
    ///
    /// If an equal value is already present, its index is returned instead.
    pub fn put(&mut self, value: T) -> usize
    where
        T: Eq,
    {
        assert!(!self.is_empty(), "Slot 0 must be reserved before put");

        let bucket_index = self.bucket_index(&value);
        let mut index = self.buckets[bucket_index];

        while index != 0 {
            if self.data[index].value == value {
                // The value already exists.
                return index;
            }
            index = self.data[index].next;
        }

        // Create new entry and prepend it to the bucket.
        let i = self.push(value, true);
        self.data[i].next = self.buckets[bucket_index];
        self.buckets[bucket_index] = i;

        if self.data.len() > self.buckets.len() {
            self.grow();
        }

        i
    }

    /// Double the number of buckets and relink all hashed entries.
    fn grow(&mut self) {
        let size = self.buckets.len() * 2;
        self.buckets = vec![0; size];
        self.bitmask = (size - 1) as u64;

        for i in 0..self.data.len() {
            if !self.data[i].hashed {
                continue;
            }
            let b = self.bucket_index(&self.data[i].value);
            self.data[i].next = self.buckets[b];
            self.buckets[b] = i;
        }
    }
}

impl<T> Index<usize> for Table<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.value(index)
    }
}
