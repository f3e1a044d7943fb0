use jsonflow::{
    feeder::{JsonFeeder, PushJsonFeeder},
    JsonEvent, JsonParser,
};

#[macro_use]
extern crate afl;

fn main() {
    fuzz!(|data: &[u8]| {
        let mut parser = JsonParser::new(PushJsonFeeder::new());
        let mut i: usize = 0;
        loop {
            let mut e = parser.next_event();
            while matches!(e, Ok(Some(JsonEvent::NeedMoreInput))) {
                i += parser.feeder.push_bytes(&data[i..]);
                if i == data.len() {
                    parser.feeder.done();
                }
                e = parser.next_event();
            }

            match e {
                Ok(Some(JsonEvent::Eof)) | Ok(None) | Err(_) => break,
                Ok(Some(JsonEvent::Error(_))) => break,
                _ => {}
            }
        }
    });
}
