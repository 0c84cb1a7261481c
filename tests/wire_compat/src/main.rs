fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use folderstore_protocol::{
        ErrorCode, Event, InitResponse, Operation, Request, Response, decode_request,
    };

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and compares
    /// the JSON values (order-independent comparison).
    fn roundtrip_test<T>(name: &str) -> T
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  git-lfs: {fixture}\n  Rust:    {reserialized}"
        );
        parsed
    }

    // --- Requests ---

    #[test]
    fn fixture_init_request() {
        let req: Request = roundtrip_test("init_request.json");
        assert_eq!(req.event, Event::Init);
        assert_eq!(req.operation, Some(Operation::Upload));
        assert_eq!(req.concurrenttransfers, Some(3));
    }

    #[test]
    fn fixture_upload_request() {
        let req: Request = roundtrip_test("upload_request.json");
        assert_eq!(req.event, Event::Upload);
        assert_eq!(req.size(), 346232);
        let action = req.action.unwrap();
        assert_eq!(action.href, "nfs://server/path");
        assert_eq!(action.header["key"], "value");
    }

    #[test]
    fn fixture_download_request() {
        let req: Request = roundtrip_test("download_request.json");
        assert_eq!(req.event, Event::Download);
        assert!(req.path.is_none());
    }

    #[test]
    fn fixture_terminate_request() {
        let req: Request = roundtrip_test("terminate_request.json");
        assert_eq!(req.event, Event::Terminate);
    }

    #[test]
    fn request_line_with_unknown_fields() {
        let line = r#"{"event":"download","oid":"abcd","size":1,"surprise":{"nested":[1,2]}}"#;
        let req = decode_request(line).unwrap();
        assert_eq!(req.oid(), "abcd");
    }

    #[test]
    fn unknown_event_decodes() {
        let req = decode_request(r#"{"event":"someday"}"#).unwrap();
        assert_eq!(req.event, Event::Unknown);
    }

    // --- Responses ---

    #[test]
    fn fixture_init_response_ok() {
        let resp: InitResponse = roundtrip_test("init_response_ok.json");
        assert!(resp.error.is_none());
    }

    #[test]
    fn fixture_init_response_error() {
        let resp: InitResponse = roundtrip_test("init_response_error.json");
        assert_eq!(resp, InitResponse::base_dir_not_specified());
    }

    #[test]
    fn fixture_complete_download() {
        let resp: Response = roundtrip_test("complete_download.json");
        assert!(resp.is_terminal());
    }

    #[test]
    fn fixture_complete_upload() {
        let resp: Response = roundtrip_test("complete_upload.json");
        assert_eq!(
            resp,
            Response::complete(
                "bf3e3e2af9366a3b704ae0c31de5afa64193ebabffde2091936ad2e7510bc03a",
                None
            )
        );
    }

    #[test]
    fn fixture_complete_error() {
        let resp: Response = roundtrip_test("complete_error.json");
        match resp {
            Response::Complete {
                error: Some(err),
                path: None,
                ..
            } => assert_eq!(err.error_code(), Some(ErrorCode::SourceStat)),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn fixture_progress() {
        let resp: Response = roundtrip_test("progress.json");
        assert_eq!(
            resp,
            Response::progress(
                "22ab5f63670800cc7be06dbed816012b0dc411e774754c7579467d2536a9cf3e",
                1234,
                64
            )
        );
        assert!(!resp.is_terminal());
    }
}
