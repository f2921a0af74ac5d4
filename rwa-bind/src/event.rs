// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Typed event records and the two ways of receiving them.
//!
//! [`EventIterator`] pulls records from a finite or live log stream. [`EventSubscription`]
//! pushes them into a caller-owned channel from a background task.

use crate::{
    backend::LogSubscription,
    error::{Error, Result},
    types::RawLog,
};
use log::{debug, warn};
use rwa_abi::{Event, Value};
use std::marker::PhantomData;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;

/// A typed record of one contract event, carrying the log it was decoded from.
pub trait ContractEvent: Sized + Send + 'static {
    /// Event name as declared in the ABI.
    const NAME: &'static str;

    /// Builds the record from values in declaration order.
    fn from_values(values: Vec<Value>, raw: RawLog) -> rwa_abi::Result<Self>;

    fn raw(&self) -> &RawLog;

    fn decode(event: &Event, log: RawLog) -> Result<Self> {
        let values = event.decode_log(&log.topics, &log.data)?;
        Ok(Self::from_values(values, log)?)
    }
}

/// Pull-based iteration over decoded events.
///
/// The first failure, whether from the transport or from decoding, is latched: every later
/// [`next`](Self::next) returns it again.
#[derive(Debug)]
pub struct EventIterator<E> {
    event: Event,
    logs: LogSubscription,
    failure: Option<Error>,
    _marker: PhantomData<fn() -> E>,
}

impl<E: ContractEvent> EventIterator<E> {
    pub fn new(event: Event, logs: LogSubscription) -> Self {
        Self {
            event,
            logs,
            failure: None,
            _marker: PhantomData,
        }
    }

    /// Next record, or `None` once the stream has ended.
    pub async fn next(&mut self) -> Result<Option<E>> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        let result = match self.logs.recv().await {
            None => return Ok(None),
            Some(Ok(log)) => E::decode(&self.event, log),
            Some(Err(err)) => Err(err.into()),
        };
        result.map(Some).map_err(|err| {
            self.failure = Some(err.clone());
            err
        })
    }

    /// The latched failure, if any.
    pub fn error(&self) -> Option<&Error> {
        self.failure.as_ref()
    }

    /// Cancels the underlying stream. Records already buffered are still returned.
    pub fn close(&mut self) {
        self.logs.unsubscribe();
    }

    /// Drains the remaining records.
    pub async fn collect(mut self) -> Result<Vec<E>> {
        let mut records = vec![];
        while let Some(record) = self.next().await? {
            records.push(record);
        }
        Ok(records)
    }
}

/// Handle to a background task forwarding decoded events into a channel.
///
/// The task ends when it is unsubscribed, when the receiving half of the channel is dropped,
/// or when the log stream fails. It always releases its log subscription on the way out.
#[derive(Debug)]
pub struct EventSubscription {
    cancel: CancellationToken,
    worker: Option<JoinHandle<Option<Error>>>,
    failure: Option<Error>,
}

impl EventSubscription {
    pub(crate) fn spawn<E: ContractEvent>(
        event: Event,
        logs: LogSubscription,
        sink: mpsc::Sender<E>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let worker = tokio::spawn(forward(event, logs, sink, cancel.clone()));
        Self {
            cancel,
            worker: Some(worker),
            failure: None,
        }
    }

    /// Stops the worker and waits for it to exit. Idempotent.
    ///
    /// Returns the error that ended the worker, if it failed before being stopped.
    pub async fn unsubscribe(&mut self) -> Option<Error> {
        self.cancel.cancel();
        self.join().await
    }

    /// Waits for the worker to exit on its own, returning its error if it failed.
    pub async fn join(&mut self) -> Option<Error> {
        if let Some(worker) = self.worker.take() {
            self.failure = match worker.await {
                Ok(failure) => failure,
                Err(err) => Some(Error::Worker(err.to_string())),
            };
        }
        self.failure.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn forward<E: ContractEvent>(
    event: Event,
    mut logs: LogSubscription,
    sink: mpsc::Sender<E>,
    cancel: CancellationToken,
) -> Option<Error> {
    let failure = loop {
        let log = tokio::select! {
            biased;
            _ = cancel.cancelled() => break None,
            _ = sink.closed() => break None,
            next = logs.recv() => match next {
                Some(Ok(log)) => log,
                Some(Err(err)) => break Some(Error::from(err)),
                None => break None,
            },
        };
        let record = match E::decode(&event, log) {
            Ok(record) => record,
            Err(err) => break Some(err),
        };
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break None,
            sent = sink.send(record) => if sent.is_err() {
                break None;
            },
        }
    };
    logs.unsubscribe();
    match &failure {
        Some(err) => warn!("{} watcher stopped: {err}", event.name),
        None => debug!("{} watcher stopped", event.name),
    }
    failure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use alloy_primitives::{Address, U256};
    use pretty_assertions::assert_eq;
    use rwa_abi::{typed::next_field, Abi};

    #[derive(Debug, PartialEq)]
    struct PortfolioUpdated {
        user: Address,
        current_value: U256,
        risk_analysis: u8,
        raw: RawLog,
    }

    impl ContractEvent for PortfolioUpdated {
        const NAME: &'static str = "PortfolioUpdated";

        fn from_values(values: Vec<Value>, raw: RawLog) -> rwa_abi::Result<Self> {
            let mut fields = values.into_iter();
            Ok(Self {
                user: next_field(&mut fields, "user")?,
                current_value: next_field(&mut fields, "currentValue")?,
                risk_analysis: next_field(&mut fields, "riskAnalysis")?,
                raw,
            })
        }

        fn raw(&self) -> &RawLog {
            &self.raw
        }
    }

    fn portfolio_updated() -> Event {
        let abi = Abi::parse(
            r#"[{"type":"event","name":"PortfolioUpdated","anonymous":false,"inputs":[
                {"name":"user","type":"address","indexed":true},
                {"name":"currentValue","type":"uint256","indexed":false},
                {"name":"riskAnalysis","type":"uint8","indexed":false}]}]"#,
        )
        .unwrap();
        abi.event("PortfolioUpdated").unwrap().clone()
    }

    fn log(event: &Event, user: Address, value: u64, index: u64) -> RawLog {
        let values = [user.into(), Value::uint(value), Value::Uint(U256::from(1), 8)];
        let (topics, data) = event.encode_log(&values).unwrap();
        RawLog {
            topics,
            data: data.into(),
            log_index: index,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn iterator_decodes_in_order() {
        let event = portfolio_updated();
        let user = Address::repeat_byte(0x42);
        let logs = vec![log(&event, user, 10, 0), log(&event, user, 20, 1)];
        let logs = LogSubscription::from_logs(logs);
        let records = EventIterator::<PortfolioUpdated>::new(event, logs)
            .collect()
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].user, user);
        assert_eq!(records[1].current_value, U256::from(20));
        assert_eq!(records[1].raw().log_index, 1);
    }

    #[tokio::test]
    async fn iterator_latches_failures() {
        let event = portfolio_updated();
        let mut garbled = log(&event, Address::ZERO, 1, 0);
        garbled.topics.pop();

        let mut iter = EventIterator::<PortfolioUpdated>::new(
            event.clone(),
            LogSubscription::from_logs(vec![garbled, log(&event, Address::ZERO, 2, 1)]),
        );
        let err = iter.next().await.unwrap_err();
        assert!(matches!(err, Error::Abi(rwa_abi::Error::TopicCount { .. })));
        assert_eq!(iter.next().await.unwrap_err(), err);
        assert_eq!(iter.error(), Some(&err));

        let (feed, logs) = LogSubscription::channel(1);
        feed.fail(TransportError::SubscriptionClosed);
        let mut iter = EventIterator::<PortfolioUpdated>::new(event, logs);
        let expected = Error::Transport(TransportError::SubscriptionClosed);
        assert_eq!(iter.next().await.unwrap_err(), expected);
        assert_eq!(iter.next().await.unwrap_err(), expected);
    }

    #[tokio::test]
    async fn close_cancels_and_keeps_buffered_records() {
        let event = portfolio_updated();
        let user = Address::repeat_byte(0x33);
        let (feed, logs) = LogSubscription::channel(4);
        let mut iter = EventIterator::<PortfolioUpdated>::new(event.clone(), logs);
        feed.send(log(&event, user, 9, 0)).await.unwrap();

        iter.close();
        iter.close();
        assert!(feed.is_cancelled());
        assert!(feed.send(log(&event, user, 10, 1)).await.is_err());

        let record = iter.next().await.unwrap().expect("buffered record");
        assert_eq!(record.current_value, U256::from(9));
        assert!(iter.next().await.unwrap().is_none());
        assert!(iter.error().is_none());
    }

    #[tokio::test]
    async fn worker_forwards_until_unsubscribed() {
        let event = portfolio_updated();
        let user = Address::repeat_byte(7);
        let (feed, logs) = LogSubscription::channel(8);
        let (sink, mut records) = mpsc::channel(8);
        let mut sub = EventSubscription::spawn::<PortfolioUpdated>(event.clone(), logs, sink);

        feed.send(log(&event, user, 5, 0)).await.unwrap();
        assert_eq!(records.recv().await.unwrap().current_value, U256::from(5));

        assert_eq!(sub.unsubscribe().await, None);
        assert_eq!(sub.unsubscribe().await, None);
        assert!(sub.is_finished());
        assert!(feed.is_cancelled());
        assert!(records.recv().await.is_none());
    }

    #[tokio::test]
    async fn worker_exits_when_sink_dropped() {
        let event = portfolio_updated();
        let (feed, logs) = LogSubscription::channel(8);
        let (sink, records) = mpsc::channel::<PortfolioUpdated>(8);
        let mut sub = EventSubscription::spawn(event, logs, sink);
        drop(records);
        assert_eq!(sub.join().await, None);
        assert!(feed.is_cancelled());
    }

    #[tokio::test]
    async fn worker_reports_stream_failure() {
        let event = portfolio_updated();
        let (feed, logs) = LogSubscription::channel(8);
        let (sink, _records) = mpsc::channel::<PortfolioUpdated>(8);
        let mut sub = EventSubscription::spawn(event, logs, sink);
        feed.fail(TransportError::Connection("reset".into()));
        assert_eq!(
            sub.join().await,
            Some(Error::Transport(TransportError::Connection("reset".into())))
        );
    }
}
