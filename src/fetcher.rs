// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::{
    TuiResult,
    event::{Event, UiData},
    http_client::HttpClient,
};

/// Fires the scheduler state, jobs and executors requests without waiting
/// for one another. Every request reports back with exactly one
/// [`Event::DataLoaded`] tagged with `cycle`.
pub fn spawn_fetch_cycle(
    client: Arc<HttpClient>,
    tx: UnboundedSender<Event>,
    cycle: u64,
) -> Vec<JoinHandle<()>> {
    tracing::debug!("Starting fetch cycle {cycle}");

    let state_client = client.clone();
    let jobs_client = client.clone();
    let executors_client = client;

    vec![
        spawn_fetch(
            tx.clone(),
            cycle,
            "scheduler state",
            UiData::SchedulerState,
            async move { state_client.get_scheduler_state().await },
        ),
        spawn_fetch(
            tx.clone(),
            cycle,
            "jobs",
            UiData::Jobs,
            async move { jobs_client.get_jobs().await },
        ),
        spawn_fetch(
            tx,
            cycle,
            "executors",
            UiData::Executors,
            async move { executors_client.get_executors().await },
        ),
    ]
}

fn spawn_fetch<T, F>(
    tx: UnboundedSender<Event>,
    cycle: u64,
    resource: &'static str,
    wrap: fn(Result<T, String>) -> UiData,
    request: F,
) -> JoinHandle<()>
where
    T: Send + 'static,
    F: Future<Output = TuiResult<T>> + Send + 'static,
{
    tokio::spawn(async move {
        let result = request.await.map_err(|err| {
            tracing::error!("Failed to load the {resource}: {err}");
            err.to_string()
        });

        let event = Event::DataLoaded {
            cycle,
            data: wrap(result),
        };
        if tx.send(event).is_err() {
            tracing::debug!("The {resource} of cycle {cycle} arrived after the view closed");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::Settings;
    use crate::state::{Slot, ViewState};
    use serde_json::json;
    use tokio::sync::mpsc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount(server: &MockServer, endpoint: &str, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(response)
            .expect(1)
            .mount(server)
            .await;
    }

    fn client_for(server: &MockServer) -> Arc<HttpClient> {
        let settings =
            Settings::with_overrides(&format!("scheduler:\n  url: {}\n", server.uri()))
                .unwrap();
        Arc::new(HttpClient::new(&settings).unwrap())
    }

    #[tokio::test]
    async fn every_resource_reports_once() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/api/state",
            ResponseTemplate::new(200).set_body_json(json!({"started": 0, "version": "48.0.0"})),
        )
        .await;
        mount(
            &server,
            "/api/jobs",
            ResponseTemplate::new(200).set_body_json(json!([
                {"job_id": "j1", "status": "RUNNING", "num_stages": 3, "percent_complete": 42}
            ])),
        )
        .await;
        mount(
            &server,
            "/api/executors",
            ResponseTemplate::new(200).set_body_json(json!([
                {"id": "e1", "host": "localhost", "port": 50051, "last_seen": 1}
            ])),
        )
        .await;

        let (tx, mut rx) = mpsc::unbounded_channel();
        for handle in spawn_fetch_cycle(client_for(&server), tx, 0) {
            handle.await.unwrap();
        }

        let mut state = ViewState::new();
        let mut received = 0;
        while let Ok(event) = rx.try_recv() {
            let (cycle, data) = match event {
                Event::DataLoaded { cycle, data } => (cycle, data),
                other => panic!("unexpected event {other:?}"),
            };
            assert_eq!(cycle, 0);
            assert!(state.apply(cycle, data));
            received += 1;
        }

        assert_eq!(received, 3);
        assert_eq!(
            state.scheduler_state().loaded().map(|s| s.version.as_str()),
            Some("48.0.0")
        );
        assert_eq!(state.jobs().loaded().map(Vec::len), Some(1));
        assert_eq!(state.executors().loaded().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn failed_resource_leaves_others_untouched() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/api/state",
            ResponseTemplate::new(200).set_body_json(json!({"started": 0, "version": "48.0.0"})),
        )
        .await;
        mount(&server, "/api/jobs", ResponseTemplate::new(503)).await;
        mount(
            &server,
            "/api/executors",
            ResponseTemplate::new(200).set_body_json(json!([])),
        )
        .await;

        let (tx, mut rx) = mpsc::unbounded_channel();
        for handle in spawn_fetch_cycle(client_for(&server), tx, 7) {
            handle.await.unwrap();
        }

        let mut state = ViewState::new();
        while let Ok(Event::DataLoaded { cycle, data }) = rx.try_recv() {
            state.apply(cycle, data);
        }

        assert!(matches!(state.jobs(), Slot::Failed(_)));
        assert!(state.scheduler_state().loaded().is_some());
        assert_eq!(state.executors().loaded().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn closed_view_does_not_fail_the_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        for handle in spawn_fetch_cycle(client_for(&server), tx, 0) {
            handle.await.unwrap();
        }
    }
}
