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

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::{TuiResult, error::TuiError, event::Event, http_client::HttpClient};

/// Downloads the DOT plan of `job_id` and saves it, byte for byte, as
/// `<dir>/<job_id>.dot`.
pub async fn download_job_dot(
    client: &HttpClient,
    job_id: &str,
    dir: &Path,
) -> TuiResult<PathBuf> {
    let file_name = dot_file_name(job_id)?;
    let dot = client.get_job_dot(job_id).await?;

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, &dot).await?;

    tracing::info!("Saved the DOT plan of job {job_id} to {}", path.display());
    Ok(path)
}

/// Runs [`download_job_dot`] in the background and reports the outcome with
/// an [`Event::DownloadFinished`].
pub fn spawn_download(
    client: Arc<HttpClient>,
    tx: UnboundedSender<Event>,
    job_id: String,
    dir: PathBuf,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = download_job_dot(&client, &job_id, &dir)
            .await
            .map_err(|err| {
                tracing::error!("Failed to download the DOT plan of job {job_id}: {err}");
                err.to_string()
            });

        if tx.send(Event::DownloadFinished { job_id, result }).is_err() {
            tracing::debug!("Download finished after the view closed");
        }
    })
}

fn dot_file_name(job_id: &str) -> TuiResult<String> {
    let invalid = job_id.is_empty()
        || job_id == "."
        || job_id == ".."
        || job_id.contains(['/', '\\']);
    if invalid {
        return Err(TuiError::InvalidJobId(job_id.to_string()));
    }
    Ok(format!("{job_id}.dot"))
}
