//! Message routing feeding the mapper

use std::sync::{Arc, Mutex};

use serde_json::json;
use tagmap_config::TagmapConfig;
use tagmap_core::map;
use tagmap_messaging::{
    DispatchError, Dispatcher, Envelope, EnvelopeHandler, Handler, Message, Middleware, Router,
};
use tagmap_types::DynamicRecord;

use crate::common::{Contact, SCHEMA_CONFIG, write_config};

#[test]
fn handler_maps_message_payloads() {
    let file = write_config(SCHEMA_CONFIG);
    let registry = TagmapConfig::load_from(file.path())
        .unwrap()
        .schemas()
        .unwrap();
    let person = registry.require("Person").unwrap();

    let contacts = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&contacts);
    let handler: Handler = Arc::new(move |message: &Message| -> anyhow::Result<()> {
        let source = DynamicRecord::from_json(Arc::clone(&person), &message.payload)?;
        let mut contact = Contact::default();
        map(&source, &mut contact)?;
        sink.lock().unwrap().push(contact);
        Ok(())
    });

    let failures = Arc::new(Mutex::new(Vec::new()));
    let failed = Arc::clone(&failures);
    let mut router = Router::new();
    router.add_handler(
        handler,
        Arc::new(move |message: &Message, error: &anyhow::Error| {
            failed
                .lock()
                .unwrap()
                .push(format!("{}: {error}", message.request_id));
        }),
        &["person.upserted"],
    );

    let tagged: Middleware = Arc::new(|next: EnvelopeHandler| -> EnvelopeHandler {
        Arc::new(move |envelope: &Envelope| -> anyhow::Result<()> {
            anyhow::ensure!(!envelope.message.source.is_empty(), "message has no source");
            next(envelope)
        })
    });
    router.use_middleware(&[tagged]);

    let good = Message::new(
        "person.upserted",
        json!({ "name": "Ada", "address": { "city": "X" } }),
    )
    .with_request_id("r-1")
    .with_source("crm");
    router.dispatch(&Envelope::handle(good)).unwrap();

    let unsourced = Message::new("person.upserted", json!({})).with_request_id("r-2");
    let err = router.dispatch(&Envelope::handle(unsourced)).unwrap_err();
    assert!(matches!(err, DispatchError::Handler { .. }));

    let malformed = Message::new("person.upserted", json!({ "age": "old" }))
        .with_request_id("r-3")
        .with_source("crm");
    assert!(router.dispatch(&Envelope::handle(malformed)).is_err());

    let contacts = contacts.lock().unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].full_name, "Ada");
    assert_eq!(contacts[0].town, "X");

    let failures = failures.lock().unwrap();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0], "r-2: message has no source");
    assert!(failures[1].starts_with("r-3: field `Person.age` expects int"));
}
