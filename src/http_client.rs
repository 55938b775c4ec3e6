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

use std::time::Duration;

use reqwest::{Client, Method, Response, header::ACCEPT};
use serde::de::DeserializeOwned;

use crate::{
    TuiResult,
    domain::{ExecutorsData, Job, SchedulerState},
    error::TuiError,
    infrastructure::Settings,
};

pub struct HttpClient {
    scheduler_url: String,
    list_method: Method,
    client: Client,
}

impl HttpClient {
    pub fn new(config: &Settings) -> TuiResult<Self> {
        let list_method = config.http.list_method.to_ascii_uppercase();
        let list_method = Method::from_bytes(list_method.as_bytes())
            .map_err(|_| TuiError::InvalidMethod(config.http.list_method.clone()))?;

        Ok(Self {
            scheduler_url: config.scheduler.url.trim_end_matches('/').to_string(),
            list_method,
            client: Client::builder()
                .timeout(Duration::from_millis(config.http.timeout))
                .build()?,
        })
    }

    pub fn scheduler_url(&self) -> &str {
        &self.scheduler_url
    }

    pub async fn get_scheduler_state(&self) -> TuiResult<SchedulerState> {
        self.json::<SchedulerState>(&self.url("state")).await
    }

    pub async fn get_jobs(&self) -> TuiResult<Vec<Job>> {
        self.json::<Vec<Job>>(&self.url("jobs")).await
    }

    pub async fn get_executors(&self) -> TuiResult<Vec<ExecutorsData>> {
        self.json::<Vec<ExecutorsData>>(&self.url("executors")).await
    }

    /// The Graphviz rendering of a job's execution graph, as raw bytes.
    pub async fn get_job_dot(&self, job_id: &str) -> TuiResult<Vec<u8>> {
        let url = self.url(&format!("job/{job_id}/dot"));
        let response = self.send(Method::GET, &url).await?;
        let bytes = response
            .bytes()
            .await
            .inspect_err(|err| tracing::error!("Reading {url} failed: {err:?}"))?;
        Ok(bytes.to_vec())
    }

    async fn json<R>(&self, url: &str) -> TuiResult<R>
    where
        R: std::fmt::Debug + DeserializeOwned,
    {
        let response = self.send(self.list_method.clone(), url).await?;
        let body = response
            .bytes()
            .await
            .inspect_err(|err| tracing::error!("Reading {url} failed: {err:?}"))?;

        serde_json::from_slice::<R>(&body)
            .map_err(TuiError::Json)
            .inspect(|data| tracing::trace!("Loaded: {data:?}"))
            .inspect_err(|err| tracing::error!("Decoding {url} failed: {err:?}"))
    }

    async fn send(&self, method: Method, url: &str) -> TuiResult<Response> {
        tracing::trace!("Going to make a {method} request to {url}");
        self.client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .and_then(Response::error_for_status)
            .inspect(|response| tracing::trace!("Got: {response:?}"))
            .inspect_err(|err| tracing::error!("The HTTP request failed: {err:?}"))
            .map_err(TuiError::Reqwest)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.scheduler_url, path)
    }
}
