mod versionstamp;

use super::Datastore;

async fn new_ds() -> Datastore {
	Datastore::new("memory").await.unwrap()
}

#[tokio::test]
async fn unknown_datastores_are_rejected() {
	let err = Datastore::new("tikv://127.0.0.1:2379").await.err().unwrap();
	assert!(matches!(err.downcast_ref(), Some(crate::err::Error::Ds(_))));
}

#[tokio::test]
async fn datastores_display_their_kind() {
	let ds = new_ds().await;
	assert_eq!(ds.to_string(), "memory");
	ds.shutdown().await.unwrap();
}
