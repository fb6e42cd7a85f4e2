//! Tests for LookupTable chaining and overwrite semantics

use rstest::rstest;

use mansion::domain::lookup::djb2;
use mansion::domain::{DomainError, LookupTable, DEFAULT_BUCKET_COUNT};

#[rstest]
#[case(1)]
#[case(7)]
#[case(DEFAULT_BUCKET_COUNT)]
fn given_existing_key_when_put_again_then_value_replaced_and_chain_same(#[case] buckets: usize) {
    // Arrange
    let mut table = LookupTable::with_buckets(buckets).unwrap();
    table.put("Copo quebrado", "Sra. Pereira");
    table.put("Livro rasgado", "Sr. Silva");
    let chain_before = table.chain_len("Copo quebrado");

    // Act
    table.put("Copo quebrado", "Dr. Costa");

    // Assert
    assert_eq!(table.get("Copo quebrado"), Some("Dr. Costa"));
    assert_eq!(table.get("Livro rasgado"), Some("Sr. Silva"));
    assert_eq!(table.chain_len("Copo quebrado"), chain_before);
    assert_eq!(table.len(), 2);
}

#[test]
fn given_key_never_inserted_when_get_then_none() {
    let table: LookupTable = [("Faca sem cabo", "Dr. Costa")].into_iter().collect();
    assert_eq!(table.get("Faca"), None);
    assert_eq!(table.get("faca sem cabo"), None);
    assert!(!table.contains_key("Pegadas de lama"));
}

#[test]
fn given_equal_strings_when_hashing_then_same_bucket() {
    let table = LookupTable::new();
    let owned = String::from("Guardanapo com monograma");
    assert_eq!(table.bucket_index("Guardanapo com monograma"), table.bucket_index(&owned));
    assert_eq!(
        table.bucket_index(&owned),
        (djb2(&owned) % DEFAULT_BUCKET_COUNT as u64) as usize
    );
}

#[test]
fn given_long_key_when_hashing_then_wraps_without_panic() {
    let key = "z".repeat(10_000);
    let table = LookupTable::new();
    assert!(table.bucket_index(&key) < DEFAULT_BUCKET_COUNT);
}

#[test]
fn given_zero_buckets_when_creating_then_errors() {
    assert!(matches!(LookupTable::with_buckets(0), Err(DomainError::ZeroCapacity)));
}

#[test]
fn given_many_keys_when_stored_then_all_retrievable() {
    let mut table = LookupTable::with_buckets(3).unwrap();
    for i in 0..200 {
        table.put(&format!("clue {i}"), &format!("suspect {}", i % 4));
    }
    assert_eq!(table.len(), 200);
    assert_eq!(table.iter().count(), 200);
    for i in 0..200 {
        assert_eq!(table.get(&format!("clue {i}")), Some(format!("suspect {}", i % 4).as_str()));
    }
    assert_eq!(table.suspects().len(), 4);
}
