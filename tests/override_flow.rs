//! End-to-end override resolution through the public API

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use image_overrides::{FileReader, MemoryReader, OverrideClient, OverrideError, Reader, Result};

const DIGEST: &str = "sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

const CONFIG: &str = "\
images:
  all:
    repository: registry.example.com/mirror
  cert-manager:
    tag: v1.13.2
  cert-manager/cert-manager-controller:
    repository: registry.example.com/mirror/controllers
";

/// Reader wrapper counting structured decodes.
struct CountingReader<R> {
    inner: R,
    decodes: Arc<AtomicUsize>,
}

impl<R: Reader> Reader for CountingReader<R> {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.inner.set(key, value);
    }

    fn unmarshal_key<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.decodes.fetch_add(1, Ordering::SeqCst);
        self.inner.unmarshal_key(key)
    }
}

fn client() -> OverrideClient<FileReader> {
    OverrideClient::new(FileReader::from_contents(CONFIG).unwrap())
}

#[test]
fn test_all_layer_applies_to_every_component() {
    let altered = client()
        .alter_image("bootstrap-kubeadm", "k8s.gcr.io/kubeadm:v1.28.0")
        .unwrap();
    assert_eq!(altered, "registry.example.com/mirror/kubeadm:v1.28.0");
}

#[test]
fn test_component_layer_overrides_the_all_layer() {
    let altered = client()
        .alter_image("cert-manager", "quay.io/jetstack/cert-manager-webhook:v1.12.0")
        .unwrap();
    // Repository from `all`, tag from the component layer.
    assert_eq!(
        altered,
        "registry.example.com/mirror/cert-manager-webhook:v1.13.2"
    );
}

#[test]
fn test_image_layer_overrides_the_component_layer() {
    let altered = client()
        .alter_image(
            "cert-manager",
            "quay.io/jetstack/cert-manager-controller:v1.12.0",
        )
        .unwrap();
    assert_eq!(
        altered,
        "registry.example.com/mirror/controllers/cert-manager-controller:v1.13.2"
    );
}

#[test]
fn test_digest_survives_rewrite() {
    let altered = client()
        .alter_image(
            "bootstrap-kubeadm",
            &format!("k8s.gcr.io/kubeadm:v1.28.0@{}", DIGEST),
        )
        .unwrap();
    assert_eq!(
        altered,
        format!("registry.example.com/mirror/kubeadm:v1.28.0@{}", DIGEST)
    );
}

#[test]
fn test_unmatched_image_returns_input_bytes() {
    let reader = FileReader::from_contents("images:\n  cert-manager:\n    tag: v1.13.2\n").unwrap();
    let client = OverrideClient::new(reader);
    let image = "k8s.gcr.io/kubeadm:v1.28.0";
    assert_eq!(client.alter_image("bootstrap-kubeadm", image).unwrap(), image);
}

#[test]
fn test_empty_config_returns_input_bytes() {
    let client = OverrideClient::new(FileReader::from_contents("").unwrap());
    let image = "k8s.gcr.io/kubeadm:v1.28.0";
    assert_eq!(client.alter_image("bootstrap-kubeadm", image).unwrap(), image);
}

#[test]
fn test_malformed_reference_fails() {
    assert!(matches!(
        client().alter_image("bootstrap-kubeadm", ""),
        Err(OverrideError::InvalidReference(_))
    ));
}

#[test]
fn test_invalid_override_block_fails_rather_than_proceeding() {
    let reader = FileReader::from_contents("images: 42\n").unwrap();
    let client = OverrideClient::new(reader);
    assert!(matches!(
        client.alter_image("bootstrap-kubeadm", "k8s.gcr.io/kubeadm:v1.28.0"),
        Err(OverrideError::Config(_))
    ));
}

#[test]
fn test_repeated_calls_reuse_one_decode() {
    let decodes = Arc::new(AtomicUsize::new(0));
    let client = OverrideClient::new(CountingReader {
        inner: FileReader::from_contents(CONFIG).unwrap(),
        decodes: decodes.clone(),
    });

    let first = client
        .alter_image("bootstrap-kubeadm", "k8s.gcr.io/kubeadm:v1.28.0")
        .unwrap();
    let second = client
        .alter_image("bootstrap-kubeadm", "k8s.gcr.io/kubeadm:v1.28.0")
        .unwrap();
    client
        .alter_image("cert-manager", "quay.io/jetstack/cert-manager-cainjector:v1.12.0")
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(decodes.load(Ordering::SeqCst), 1);
}

#[test]
fn test_memory_reader_backed_client() {
    let value: serde_yaml::Value =
        serde_yaml::from_str("all:\n  repository: quay.io/mirror\n").unwrap();
    let client = OverrideClient::new(MemoryReader::new().with_value("images", value));
    let altered = client
        .alter_image("bootstrap-kubeadm", "k8s.gcr.io/kubeadm:v1.28.0")
        .unwrap();
    assert_eq!(altered, "quay.io/mirror/kubeadm:v1.28.0");
}
