use std::io::Write;
use tempfile::{tempdir, NamedTempFile};
use tx_trace_studio::classifier::SIGNATURES;
use tx_trace_studio::model::{Address, CallFrame, CallType, LogEvent, TxMetadata, H256};
use tx_trace_studio::reader::ParsedTrace;
use tx_trace_studio::store::{read_records, JsonLinesStore, MemoryStore};
use tx_trace_studio::tracer::Tracer;
use tx_trace_studio::utils::config::{load_config, OutputSchema, TraceConfig};
use tx_trace_studio::utils::error::ConfigError;

fn metadata(byte: u8) -> TxMetadata {
    TxMetadata {
        block_number: 42,
        tx_hash: H256([byte; 32]),
        from: Address([0x0a; 20]),
        to: Some(Address([0x0b; 20])),
        value: "1000".to_string(),
        gas_price: "7".to_string(),
        gas_used: 53000,
    }
}

fn drive<S: tx_trace_studio::store::TraceStore>(tracer: &mut Tracer<S>, byte: u8) {
    tracer.on_tx_start();
    tracer
        .on_call(CallFrame::new(0, CallType::Call, 0, Address([0x0a; 20]), Address([0x0b; 20])))
        .unwrap();
    let mut transfer_call = CallFrame::new(1, CallType::Call, 1, Address([0x0b; 20]), Address([0xee; 20]));
    transfer_call.input = vec![0xa9, 0x05, 0x9c, 0xbb, 0x00];
    tracer.on_call(transfer_call).unwrap();
    tracer
        .on_log(LogEvent {
            address: Address([0xee; 20]),
            topics: vec![SIGNATURES.transfer, H256([0x0b; 32]), H256([0x0c; 32])],
            data: vec![0x64],
            depth: 1,
        })
        .unwrap();
    tracer
        .on_value_transfer(Address([0x0a; 20]), Address([0x0b; 20]), 1000, 0)
        .unwrap();
    tracer.on_tx_end(metadata(byte)).unwrap();
}

#[test]
fn test_jsonl_store_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("traces.jsonl");

    let store = JsonLinesStore::open(&path).unwrap();
    let mut tracer = Tracer::new(&TraceConfig::default(), store);
    drive(&mut tracer, 1);
    drive(&mut tracer, 2);
    assert_eq!(tracer.stats().stored, 2);
    drop(tracer);

    let records = read_records(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].metadata, metadata(1));
    assert!(records[1].complete);

    let parsed = ParsedTrace::from_record(&records[0]).unwrap();
    assert_eq!(parsed.calls.len(), 2);
    assert_eq!(parsed.events.len(), 1);
    assert_eq!(parsed.transfers.len(), 2);

    let token = Address([0xee; 20]);
    assert!(parsed.contains_token_transfer(&Address([0x0b; 20]), &Address([0x0c; 20]), &token, 100));
    assert!(!parsed.contains_token_transfer(&Address([0x0b; 20]), &Address([0x0c; 20]), &token, 99));
    // Native transfer uses the zero address as token
    assert!(parsed.contains_token_transfer(
        &Address([0x0a; 20]),
        &Address([0x0b; 20]),
        &Address::zero(),
        1000
    ));

    let transfer_selector = [0xa9, 0x05, 0x9c, 0xbb];
    assert!(parsed.contains_function(&token, transfer_selector));
    assert!(!parsed.contains_function(&Address([0x0b; 20]), transfer_selector));
}

#[test]
fn test_reduced_schema_records() {
    let config = TraceConfig {
        output: OutputSchema {
            function_trace: false,
            classification_tags: false,
        },
        ..Default::default()
    };
    let mut tracer = Tracer::new(&config, MemoryStore::new());
    drive(&mut tracer, 3);

    let record = tracer.store().get(&H256([3; 32]).to_string()).unwrap();
    assert!(record.functrace.is_empty());

    let parsed = ParsedTrace::from_record(record).unwrap();
    assert!(parsed.calls.is_empty());
    assert_eq!(parsed.events[0].tag, None);
    assert_eq!(parsed.transfers[0].tag, None);
}

#[test]
fn test_store_keyed_by_hash() {
    let mut tracer = Tracer::new(&TraceConfig::default(), MemoryStore::new());
    drive(&mut tracer, 5);
    drive(&mut tracer, 5);

    assert_eq!(tracer.stats().transactions, 2);
    assert_eq!(tracer.store().len(), 1);
}

#[test]
fn test_load_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[session]\nmax_depth = 64\n\n[output]\nclassification_tags = false").unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.session.max_depth, 64);
    assert!(config.output.function_trace);
    assert!(!config.output.classification_tags);
}

#[test]
fn test_load_config_rejects_zero_depth() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[session]\nmax_depth = 0").unwrap();

    assert!(matches!(load_config(file.path()), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_load_config_rejects_huge_depth() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[session]\nmax_depth = 4294967295").unwrap();

    assert!(matches!(load_config(file.path()), Err(ConfigError::Invalid(_))));
}
