use super::new_ds;
use crate::err::Error;
use crate::val::{Stamp, Value};
use crate::vs::VersionStamp;
use crate::{desc, versionstamp};

/// Collect the transaction orders of every key in the datastore.
async fn orders(ds: &crate::kvs::Datastore) -> Vec<VersionStamp> {
	let tx = ds.transaction(false).await.unwrap();
	let res = tx.scan(Value::Null..desc(Value::Null), 100).await.unwrap();
	tx.cancel().await.unwrap();
	res.into_iter()
		.filter_map(|(k, _)| match k {
			Value::Stamp(Stamp {
				order: Some(o),
				..
			}) => Some(o),
			_ => None,
		})
		.collect()
}

#[test_log::test(tokio::test)]
async fn pending_keys_are_assigned_at_commit() {
	let ds = new_ds().await;
	let tx = ds.transaction(true).await.unwrap();
	tx.set(&versionstamp(7, None), &"first".into()).await.unwrap();
	tx.set(&versionstamp(7, None), &"second".into()).await.unwrap();
	tx.commit().await.unwrap();
	let tx = ds.transaction(true).await.unwrap();
	tx.set(&versionstamp(7, None), &"third".into()).await.unwrap();
	tx.commit().await.unwrap();
	let orders = orders(&ds).await;
	assert_eq!(orders, vec![
		VersionStamp::from_parts(1, 0),
		VersionStamp::from_parts(1, 1),
		VersionStamp::from_parts(2, 0),
	]);
	let tx = ds.transaction(false).await.unwrap();
	let key = versionstamp(7, Some(VersionStamp::from_parts(1, 1)));
	assert_eq!(tx.get(&key).await.unwrap(), Some("second".into()));
	tx.cancel().await.unwrap();
}

#[tokio::test]
async fn pending_values_are_assigned_at_commit() {
	let ds = new_ds().await;
	let tx = ds.transaction(true).await.unwrap();
	tx.set(&"a".into(), &desc(versionstamp(3, None))).await.unwrap();
	// Pending writes are not visible before commit
	assert_eq!(tx.get(&"a".into()).await.unwrap(), None);
	tx.commit().await.unwrap();
	let tx = ds.transaction(false).await.unwrap();
	let val = tx.get(&"a".into()).await.unwrap();
	assert_eq!(val, Some(versionstamp(3, Some(VersionStamp::from_parts(1, 0)))));
	tx.cancel().await.unwrap();
}

#[tokio::test]
async fn later_transactions_sort_later() {
	let ds = new_ds().await;
	for _ in 0..3 {
		let tx = ds.transaction(true).await.unwrap();
		tx.set(&desc(versionstamp(0, None)), &Value::Null).await.unwrap();
		tx.commit().await.unwrap();
	}
	let tx = ds.transaction(false).await.unwrap();
	let beg = desc(versionstamp(0, Some(VersionStamp::from_bytes([0xff; 10]))));
	let end = desc(versionstamp(0, Some(VersionStamp::ZERO)));
	let res = tx.scan(beg..end, 10).await.unwrap();
	let ids: Vec<u64> = res
		.into_iter()
		.filter_map(|(k, _)| match k {
			Value::Stamp(s) => s.order.map(|o| o.as_u64()),
			_ => None,
		})
		.collect();
	// Newest first, as the keys are descending
	assert_eq!(ids, vec![3, 2, 1]);
	tx.cancel().await.unwrap();
}

#[tokio::test]
async fn dual_pending_entries_are_rejected() {
	let ds = new_ds().await;
	let tx = ds.transaction(true).await.unwrap();
	let err = tx.set(&versionstamp(1, None), &versionstamp(2, None)).await.unwrap_err();
	assert_eq!(err.downcast_ref(), Some(&Error::DualPendingVersionstamp));
	let err = tx.put(&versionstamp(1, None), &"v".into()).await.unwrap_err();
	assert_eq!(err.downcast_ref(), Some(&Error::PendingVersionstamp));
	let err = tx.get(&versionstamp(1, None)).await.unwrap_err();
	assert_eq!(err.downcast_ref(), Some(&Error::PendingVersionstamp));
	tx.cancel().await.unwrap();
	assert!(orders(&ds).await.is_empty());
}

#[tokio::test]
async fn cancelled_stamps_are_never_written() {
	let ds = new_ds().await;
	let tx = ds.transaction(true).await.unwrap();
	tx.set(&versionstamp(1, None), &Value::Null).await.unwrap();
	tx.cancel().await.unwrap();
	assert!(orders(&ds).await.is_empty());
}
