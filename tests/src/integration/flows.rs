//! # End-to-End Signing Flows
//!
//! Runs the real gateway on an ephemeral port and drives it with the real
//! signing client: local wallet, reqwest-based verification client and a
//! file-backed history.
//!
//! ## Flows Tested:
//!
//! 1. **Sign → verify → persist**: a signed message comes back valid and the
//!    history survives a reopen from disk
//! 2. **Tampered message**: a different signer comes back; garbage is invalid
//! 3. **Gateway unreachable**: the entry is still closed as invalid
//! 4. **Rejected payloads**: the gateway's error text reaches the client
//! 5. **Graceful shutdown**: the server stops when signalled

#[cfg(test)]
mod tests {
    use shared_types::{SignatureRequest, VerificationResult};
    use std::net::SocketAddr;
    use tempfile::TempDir;
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;
    use tokio::task::JoinHandle;

    use ws_02_verify_gateway::{ApiGatewayService, GatewayConfig, GatewayError};
    use ws_03_signing_client::{
        ClientConfig, EntryState, FileBackedKVStore, LocalWallet, MessageHistory,
        SigningWorkflow, Submission, SystemTimeSource, TracingNotifier, VerificationApi,
        VerificationClient, WalletSession,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const WEB3_KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
    const WEB3_ADDRESS: &str = "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23";

    type FileHistory = MessageHistory<FileBackedKVStore, SystemTimeSource>;

    /// A gateway serving on an ephemeral local port.
    struct RunningGateway {
        addr: SocketAddr,
        shutdown: oneshot::Sender<()>,
        handle: JoinHandle<Result<(), GatewayError>>,
    }

    impl RunningGateway {
        async fn start() -> Self {
            let gateway = ApiGatewayService::new(GatewayConfig::default()).unwrap();
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let (shutdown, rx) = oneshot::channel();
            let handle = tokio::spawn(async move { gateway.serve(listener, rx).await });

            Self {
                addr,
                shutdown,
                handle,
            }
        }

        fn client(&self) -> VerificationClient {
            let config = ClientConfig {
                base_url: format!("http://{}", self.addr),
                ..ClientConfig::default()
            };
            VerificationClient::new(&config).unwrap()
        }

        async fn stop(self) -> Result<(), GatewayError> {
            self.shutdown.send(()).unwrap();
            self.handle.await.unwrap()
        }
    }

    fn open_history(dir: &TempDir) -> FileHistory {
        let store = FileBackedKVStore::open(dir.path().join("history.json")).unwrap();
        MessageHistory::open(store, SystemTimeSource).unwrap()
    }

    /// Address that is free right now: bind, read the port, release it.
    async fn unused_addr() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    }

    // =============================================================================
    // FLOW 1: SIGN → VERIFY → PERSIST
    // =============================================================================

    #[tokio::test]
    async fn test_signed_message_verified_and_persisted() {
        let gateway = RunningGateway::start().await;
        let dir = TempDir::new().unwrap();
        let wallet = LocalWallet::random();
        let expected_signer = wallet.address().unwrap();
        let workflow = SigningWorkflow::new(wallet, gateway.client(), TracingNotifier::new());

        let mut history = open_history(&dir);
        let submission = workflow.submit(&mut history, "Hello, Web3!").await.unwrap();

        let Submission::Verified(entry) = submission else {
            panic!("gateway should have answered");
        };
        assert_eq!(entry.state(), EntryState::Valid);
        let result = entry.verification_result.clone().unwrap();
        assert_eq!(result.signer, expected_signer);
        assert_eq!(result.original_message, "Hello, Web3!");

        drop(history);
        let reopened = open_history(&dir);
        assert_eq!(reopened.entries(), &[entry]);

        gateway.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_known_key_recovers_known_address() {
        let gateway = RunningGateway::start().await;
        let wallet = LocalWallet::from_hex(WEB3_KEY).unwrap();
        assert_eq!(wallet.address().as_deref(), Some(WEB3_ADDRESS));

        let signature = wallet.sign_message("Some data").await.unwrap();
        let result = gateway
            .client()
            .verify_signature(&SignatureRequest::new("Some data", signature))
            .await
            .unwrap();

        assert_eq!(result, VerificationResult::valid(WEB3_ADDRESS, "Some data"));
        gateway.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_newest_entry_first_across_submissions() {
        let gateway = RunningGateway::start().await;
        let dir = TempDir::new().unwrap();
        let workflow =
            SigningWorkflow::new(LocalWallet::random(), gateway.client(), TracingNotifier::new());

        let mut history = open_history(&dir);
        for message in ["first", "second", "third"] {
            workflow.submit(&mut history, message).await.unwrap();
        }

        let messages: Vec<_> = history.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["third", "second", "first"]);
        assert_eq!(history.pending().count(), 0);

        gateway.stop().await.unwrap();
    }

    // =============================================================================
    // FLOW 2: TAMPERED MESSAGE / GARBAGE SIGNATURE
    // =============================================================================

    #[tokio::test]
    async fn test_signature_for_other_message_recovers_other_signer() {
        let gateway = RunningGateway::start().await;
        let wallet = LocalWallet::random();
        let signature = wallet.sign_message("original").await.unwrap();

        let result = gateway
            .client()
            .verify_signature(&SignatureRequest::new("tampered", signature))
            .await
            .unwrap();

        // Recovery still succeeds, just not to the wallet's address
        assert!(result.is_valid);
        assert_ne!(Some(result.signer.clone()), wallet.address());
        assert_eq!(result.original_message, "tampered");

        gateway.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_garbage_signature_is_invalid_not_error() {
        let gateway = RunningGateway::start().await;

        let result = gateway
            .client()
            .verify_signature(&SignatureRequest::new("hello", "0x1234"))
            .await
            .unwrap();

        assert_eq!(result, VerificationResult::invalid("hello"));
        gateway.stop().await.unwrap();
    }

    // =============================================================================
    // FLOW 3: GATEWAY UNREACHABLE
    // =============================================================================

    #[tokio::test]
    async fn test_unreachable_gateway_closes_entry_as_invalid() {
        let dir = TempDir::new().unwrap();
        let config = ClientConfig {
            base_url: format!("http://{}", unused_addr().await),
            ..ClientConfig::default()
        };
        let client = VerificationClient::new(&config).unwrap();
        let workflow = SigningWorkflow::new(LocalWallet::random(), client, TracingNotifier::new());

        let mut history = open_history(&dir);
        let submission = workflow.submit(&mut history, "offline").await.unwrap();

        let Submission::VerificationFailed { entry, error } = submission else {
            panic!("nothing should be listening");
        };
        assert!(!error.message.is_empty());
        assert_eq!(entry.state(), EntryState::Invalid);
        assert_eq!(
            entry.verification_result,
            Some(VerificationResult::invalid("offline"))
        );

        drop(history);
        assert_eq!(open_history(&dir).entries()[0].state(), EntryState::Invalid);
    }

    // =============================================================================
    // FLOW 4: REJECTED PAYLOADS
    // =============================================================================

    #[tokio::test]
    async fn test_gateway_error_text_reaches_client() {
        let gateway = RunningGateway::start().await;

        let error = gateway
            .client()
            .verify_signature(&SignatureRequest::new("", "0xabc"))
            .await
            .unwrap_err();

        assert_eq!(
            error.message,
            r#"Both "message" and "signature" are required"#
        );
        gateway.stop().await.unwrap();
    }

    // =============================================================================
    // FLOW 5: GRACEFUL SHUTDOWN
    // =============================================================================

    #[tokio::test]
    async fn test_gateway_stops_on_signal() {
        let gateway = RunningGateway::start().await;
        let addr = gateway.addr;

        gateway.stop().await.unwrap();

        let config = ClientConfig {
            base_url: format!("http://{addr}"),
            ..ClientConfig::default()
        };
        let outcome = VerificationClient::new(&config)
            .unwrap()
            .verify_signature(&SignatureRequest::new("hello", "0xabc"))
            .await;
        assert!(outcome.is_err());
    }
}
