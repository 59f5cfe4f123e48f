//! Seeded sample data
//!
//! [`PyRandom`] is a Mersenne Twister (MT19937) seeded and sampled the way
//! CPython's `random` module does it, so a given seed yields the same sales
//! amounts, regions and transactions as the generator these workbooks were
//! first produced with.

use chrono::{Days, NaiveDate};
use rand::{Error as RandError, RngCore, SeedableRng};

/// Seed used by every generated workbook
pub const SAMPLE_SEED: u64 = 42;

pub const REGIONS: [&str; 4] = ["North", "South", "East", "West"];
pub const PRODUCTS: [&str; 3] = ["Widget A", "Widget B", "Widget C"];
pub const TRACKED_SKUS: [&str; 5] = ["SKU001", "SKU002", "SKU003", "SKU004", "SKU005"];

/// Rows in the RawData sheet
pub const SALES_RECORD_COUNT: usize = 100;
/// Random transactions drawn after the opening stock rows
pub const RANDOM_TRANSACTION_COUNT: usize = 50;

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// CPython-compatible MT19937 generator
#[derive(Clone)]
pub struct PyRandom {
    state: [u32; N],
    index: usize,
}

impl std::fmt::Debug for PyRandom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PyRandom").field("index", &self.index).finish()
    }
}

impl PyRandom {
    /// Equivalent to `random.seed(seed)` for a non-negative integer seed
    pub fn new(seed: u64) -> Self {
        let low = seed as u32;
        let high = (seed >> 32) as u32;
        // The seed is split into 32-bit words, dropping leading zero words
        if high == 0 {
            Self::from_key(&[low])
        } else {
            Self::from_key(&[low, high])
        }
    }

    fn from_key(key: &[u32]) -> Self {
        let mut mt = [0u32; N];
        mt[0] = 19_650_218;
        for i in 1..N {
            mt[i] = 1_812_433_253u32
                .wrapping_mul(mt[i - 1] ^ (mt[i - 1] >> 30))
                .wrapping_add(i as u32);
        }

        let mut i = 1;
        let mut j = 0;
        for _ in 0..N.max(key.len()) {
            mt[i] = (mt[i] ^ (mt[i - 1] ^ (mt[i - 1] >> 30)).wrapping_mul(1_664_525))
                .wrapping_add(key[j])
                .wrapping_add(j as u32);
            i += 1;
            j += 1;
            if i >= N {
                mt[0] = mt[N - 1];
                i = 1;
            }
            if j >= key.len() {
                j = 0;
            }
        }
        for _ in 0..N - 1 {
            mt[i] = (mt[i] ^ (mt[i - 1] ^ (mt[i - 1] >> 30)).wrapping_mul(1_566_083_941))
                .wrapping_sub(i as u32);
            i += 1;
            if i >= N {
                mt[0] = mt[N - 1];
                i = 1;
            }
        }
        mt[0] = UPPER_MASK;

        Self { state: mt, index: N }
    }

    fn twist(&mut self) {
        for kk in 0..N {
            let y = (self.state[kk] & UPPER_MASK) | (self.state[(kk + 1) % N] & LOWER_MASK);
            let mag = if y & 1 == 1 { MATRIX_A } else { 0 };
            self.state[kk] = self.state[(kk + M) % N] ^ (y >> 1) ^ mag;
        }
        self.index = 0;
    }

    fn genrand(&mut self) -> u32 {
        if self.index >= N {
            self.twist();
        }
        let mut y = self.state[self.index];
        self.index += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^ (y >> 18)
    }
}

impl RngCore for PyRandom {
    fn next_u32(&mut self) -> u32 {
        self.genrand()
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.genrand());
        let high = u64::from(self.genrand());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.genrand().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandError> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for PyRandom {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

/// CPython `random` sampling on top of any [`RngCore`]
///
/// Every draw is built from `next_u32` words exactly as CPython builds it
/// from MT19937 output, so with [`PyRandom`] as the source the results
/// match `random.random`, `randint` and `choice` value for value.
pub trait PySample: RngCore {
    /// `random.random()`: a float in `[0, 1)` with 53 bits of precision
    fn random(&mut self) -> f64 {
        let a = f64::from(self.next_u32() >> 5);
        let b = f64::from(self.next_u32() >> 6);
        (a * 67_108_864.0 + b) * (1.0 / 9_007_199_254_740_992.0)
    }

    /// `random.getrandbits(k)` for `k` up to 64; words fill from the low end
    fn getrandbits(&mut self, k: u32) -> u64 {
        match k.min(64) {
            0 => 0,
            k @ 1..=32 => u64::from(self.next_u32() >> (32 - k)),
            k => {
                let low = u64::from(self.next_u32());
                let high = u64::from(self.next_u32() >> (64 - k));
                (high << 32) | low
            }
        }
    }

    /// `random.randint(low, high)`, both ends inclusive
    ///
    /// The whole `u32` range is accepted. `high < low` returns `low`
    /// without drawing.
    fn randint(&mut self, low: u32, high: u32) -> u32 {
        if high < low {
            return low;
        }
        let span = u64::from(high - low) + 1;
        // below(span) <= high - low, so the sum stays within u32
        low + below(self, span) as u32
    }

    /// `random.choice(items)`; `None` for an empty slice
    fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(below(self, items.len() as u64) as usize)
    }
}

impl<R: RngCore + ?Sized> PySample for R {}

/// Uniform integer in `[0, n)` by rejection over `bit_length(n)` bits
fn below<R: PySample + ?Sized>(rng: &mut R, n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let k = 64 - n.leading_zeros();
    loop {
        let r = rng.getrandbits(k);
        if r < n {
            return r;
        }
    }
}

/// One row of the RawData sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub amount: u32,
    pub region: &'static str,
    pub product: &'static str,
    /// `MM/DD/YYYY`
    pub date: String,
    pub customer_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    In,
    Out,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::In => "IN",
            TransactionKind::Out => "OUT",
        }
    }
}

/// One row of the Transactions sheet
#[derive(Debug, Clone, PartialEq)]
pub struct StockTransaction {
    pub date: String,
    pub sku: &'static str,
    pub kind: TransactionKind,
    pub quantity: u32,
    /// Always 0; price lookups are left to the sheet
    pub unit_price: f64,
    pub reference: String,
    pub notes: &'static str,
}

/// `2024-01-01` plus `days`, formatted `MM/DD/YYYY`
///
/// Every `u16` offset is representable; the largest lands on `06/07/2203`.
pub fn sample_date(days: u16) -> String {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|base| base.checked_add_days(Days::new(u64::from(days))))
        .map(|date| date.format("%m/%d/%Y").to_string())
        .unwrap_or_default()
}

/// Draw the 100 sales rows; consumes three values per row from `rng`
pub fn sales_records<R: RngCore + ?Sized>(rng: &mut R) -> Vec<SalesRecord> {
    (0..SALES_RECORD_COUNT as u16)
        .map(|n| SalesRecord {
            amount: rng.randint(800, 4500),
            region: pick(rng, &REGIONS),
            product: pick(rng, &PRODUCTS),
            date: sample_date(n),
            customer_id: format!("C{:03}", n + 1),
        })
        .collect()
}

/// Opening stock for each tracked SKU followed by 50 random movements
///
/// Outgoing movements are three times as likely as restocks.
pub fn stock_transactions<R: RngCore + ?Sized>(rng: &mut R) -> Vec<StockTransaction> {
    const KINDS: [TransactionKind; 4] = [
        TransactionKind::In,
        TransactionKind::Out,
        TransactionKind::Out,
        TransactionKind::Out,
    ];

    let mut transactions: Vec<StockTransaction> = TRACKED_SKUS
        .iter()
        .map(|&sku| StockTransaction {
            date: sample_date(0),
            sku,
            kind: TransactionKind::In,
            quantity: rng.randint(100, 300),
            unit_price: 0.0,
            reference: "PO-2024-001".to_string(),
            notes: "Initial stock",
        })
        .collect();

    for i in 0..RANDOM_TRANSACTION_COUNT as u16 {
        let sku = pick(rng, &TRACKED_SKUS);
        let kind = pick(rng, &KINDS);
        let (quantity, reference, notes) = match kind {
            TransactionKind::Out => (
                rng.randint(5, 50),
                format!("SO-2024-{:03}", i + 1),
                "Customer order",
            ),
            TransactionKind::In => (
                rng.randint(50, 200),
                format!("PO-2024-{:03}", i / 10 + 2),
                "Restock",
            ),
        };
        transactions.push(StockTransaction {
            date: sample_date(i / 2),
            sku,
            kind,
            quantity,
            unit_price: 0.0,
            reference,
            notes,
        });
    }

    transactions
}

/// `choice` over a fixed, non-empty table
fn pick<R: RngCore + ?Sized, T: Copy, const K: usize>(rng: &mut R, items: &[T; K]) -> T {
    items[below(rng, K as u64) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::Rng;

    #[test]
    fn test_random_matches_cpython() {
        let mut rng = PyRandom::new(42);
        assert_eq!(rng.random(), 0.6394267984578837);
    }

    #[test]
    fn test_randint_matches_cpython() {
        let mut rng = PyRandom::new(42);
        let draws: Vec<u32> = (0..3).map(|_| rng.randint(800, 4500)).collect();
        assert_eq!(draws, vec![3419, 1256, 902]);
    }

    #[test]
    fn test_choice() {
        let mut rng = PyRandom::new(42);
        let letters = ["a", "b", "c", "d"];
        assert_eq!(rng.choice(&letters), Some(&"a"));
        assert_eq!(rng.choice(&letters), Some(&"a"));
        assert_eq!(rng.choice::<u8>(&[]), None);
    }

    #[test]
    fn test_single_item_choice_still_draws() {
        // CPython rejects 1-bit draws until one is below 1
        let mut rng = PyRandom::new(42);
        assert_eq!(rng.choice(&["only"]), Some(&"only"));
        assert_eq!(rng.randint(800, 4500), 902);
    }

    #[test]
    fn test_randint_full_u32_range() {
        let mut rng = PyRandom::new(42);
        assert_eq!(rng.randint(0, u32::MAX), 2_746_317_213);
        assert_eq!(rng.randint(5, 5), 5);
        assert_eq!(rng.randint(0, 1 << 31), 1_181_241_943);

        assert_eq!(rng.randint(u32::MAX, u32::MAX), u32::MAX);
        assert_eq!(rng.randint(10, 3), 10);
    }

    #[test]
    fn test_getrandbits_word_order() {
        let mut words = PyRandom::new(42);
        let low = u64::from(words.next_u32());
        let high = u64::from(words.next_u32() >> 31);

        let mut rng = PyRandom::new(42);
        assert_eq!(rng.getrandbits(33), (high << 32) | low);
        assert_eq!(rng.getrandbits(0), 0);
    }

    #[test]
    fn test_generators_accept_any_rng() {
        // A source that only yields zero words always takes the first option
        let mut zeros = StepRng::new(0, 0);
        let records = sales_records(&mut zeros);
        assert!(records
            .iter()
            .all(|r| r.amount == 800 && r.region == "North" && r.product == "Widget A"));

        let transactions = stock_transactions(&mut zeros);
        assert_eq!(transactions.len(), 55);
        assert!(transactions[5..]
            .iter()
            .all(|t| t.sku == "SKU001" && t.kind == TransactionKind::In && t.quantity == 50));
    }

    #[test]
    fn test_seedable_rng_agrees() {
        let mut a = PyRandom::seed_from_u64(SAMPLE_SEED);
        let mut b = PyRandom::from_seed(SAMPLE_SEED.to_le_bytes());
        let mut c = PyRandom::new(SAMPLE_SEED);
        assert_eq!(a.next_u32(), c.next_u32());
        assert_eq!(b.next_u32(), PyRandom::new(SAMPLE_SEED).next_u32());
        let x: f64 = a.gen();
        assert!((0.0..1.0).contains(&x));
    }

    #[test]
    fn test_sales_records() {
        let records = sales_records(&mut PyRandom::new(SAMPLE_SEED));
        assert_eq!(records.len(), 100);

        assert_eq!(
            records[0],
            SalesRecord {
                amount: 3419,
                region: "North",
                product: "Widget A",
                date: "01/01/2024".into(),
                customer_id: "C001".into(),
            }
        );
        assert_eq!(records[1].amount, 3837);
        assert_eq!(records[1].region, "East");
        assert_eq!(records[2].product, "Widget C");

        let last = &records[99];
        assert_eq!(
            (last.amount, last.region, last.date.as_str(), last.customer_id.as_str()),
            (3792, "West", "04/09/2024", "C100")
        );
        assert_eq!(records.iter().map(|r| r.amount).sum::<u32>(), 272_929);
    }

    #[test]
    fn test_stock_transactions_continue_sales_stream() {
        let mut rng = PyRandom::new(SAMPLE_SEED);
        sales_records(&mut rng);
        let transactions = stock_transactions(&mut rng);

        assert_eq!(transactions.len(), 55);
        let opening: Vec<u32> = transactions[..5].iter().map(|t| t.quantity).collect();
        assert_eq!(opening, vec![148, 175, 155, 114, 248]);

        let first_random = &transactions[5];
        assert_eq!(first_random.sku, "SKU005");
        assert_eq!(first_random.kind, TransactionKind::In);
        assert_eq!(first_random.quantity, 130);
        assert_eq!(first_random.reference, "PO-2024-002");

        let last = &transactions[54];
        assert_eq!(last.date, "01/25/2024");
        assert_eq!(last.reference, "SO-2024-050");
        assert_eq!(last.notes, "Customer order");

        let outgoing = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Out)
            .count();
        assert_eq!(outgoing, 32);
    }

    #[test]
    fn test_net_stock_per_sku() {
        let mut rng = PyRandom::new(SAMPLE_SEED);
        sales_records(&mut rng);
        let transactions = stock_transactions(&mut rng);

        let net: Vec<i64> = TRACKED_SKUS
            .iter()
            .map(|sku| {
                transactions
                    .iter()
                    .filter(|t| t.sku == *sku)
                    .map(|t| match t.kind {
                        TransactionKind::In => i64::from(t.quantity),
                        TransactionKind::Out => -i64::from(t.quantity),
                    })
                    .sum()
            })
            .collect();
        assert_eq!(net, vec![708, 539, 138, 238, 505]);
    }

    #[test]
    fn test_sample_date() {
        assert_eq!(sample_date(0), "01/01/2024");
        assert_eq!(sample_date(59), "02/29/2024");
        assert_eq!(sample_date(u16::MAX), "06/07/2203");
    }
}
