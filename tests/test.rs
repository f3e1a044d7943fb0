use jsonflow::feeder::{JsonFeeder, PushJsonFeeder};
use jsonflow::{JsonEvent, JsonParser};

mod prettyprinter;

#[path = "feeder/bufreader.rs"]
mod feeder;

#[cfg(feature = "tokio")]
#[path = "tokio/asyncbufreader.rs"]
mod tokio;

#[test]
fn simple_object() {
    let json = r#"{"name": "Elvis", "age": 42}"#;

    let mut prettyprinter = prettyprinter::PrettyPrinter::new();
    let mut parser = JsonParser::new(PushJsonFeeder::new());
    parser.feeder.push_bytes(json.as_bytes());
    parser.feeder.done();
    loop {
        let event = parser.next_event().unwrap();
        let Some(event) = event else {
            break;
        };
        prettyprinter.on_event(event, &parser).unwrap();
        if event == JsonEvent::Eof {
            break;
        }
    }

    println!("{}", prettyprinter.get_result());
}
