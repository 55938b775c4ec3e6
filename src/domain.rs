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

use std::fmt;

use serde::Deserialize;
use serde_json::{Value, json};

use crate::ui::table::TableRow;

/// Returned by the /api/state REST endpoint
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct SchedulerState {
    pub started: i64,
    pub version: String,
}

/// One entry of the /api/executors REST endpoint
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ExecutorsData {
    pub id: String,
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub last_seen: Option<i64>,
}

/// Coarse classification of the status text the scheduler reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    Running,
    Failed,
    Completed,
    Unknown,
}

impl JobStatus {
    /// The scheduler reports e.g. `Running`, `Failed: <reason>`,
    /// `Completed. Produced 2 partitions ...` or `Invalid State`, so only the
    /// leading word counts.
    pub fn classify(status: &str) -> Self {
        let leading = status
            .trim_start()
            .split(|c: char| !c.is_ascii_alphabetic())
            .next()
            .unwrap_or_default()
            .to_ascii_uppercase();

        match leading.as_str() {
            "QUEUED" => JobStatus::Queued,
            "RUNNING" => JobStatus::Running,
            "FAILED" => JobStatus::Failed,
            "COMPLETED" | "SUCCESSFUL" => JobStatus::Completed,
            _ => JobStatus::Unknown,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JobStatus::Queued => "QUEUED",
            JobStatus::Running => "RUNNING",
            JobStatus::Failed => "FAILED",
            JobStatus::Completed => "COMPLETED",
            JobStatus::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

/// One entry of the /api/jobs REST endpoint
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Job {
    pub job_id: String,
    #[serde(default)]
    pub job_name: String,
    /// Status text exactly as reported, e.g. `Failed: <reason>`
    #[serde(alias = "job_status")]
    pub status: String,
    pub num_stages: u32,
    #[serde(default)]
    pub completed_stages: u32,
    pub percent_complete: f64,
}

impl Job {
    pub fn state(&self) -> JobStatus {
        JobStatus::classify(&self.status)
    }
}

impl TableRow for Job {
    fn value(&self, accessor: &str) -> Value {
        match accessor {
            "job_id" => json!(self.job_id),
            "job_name" => json!(self.job_name),
            "status" | "job_status" => json!(self.status),
            "num_stages" => json!(self.num_stages),
            "completed_stages" => json!(self.completed_stages),
            "percent_complete" => json!(self.percent_complete),
            _ => Value::Null,
        }
    }
}

impl TableRow for ExecutorsData {
    fn value(&self, accessor: &str) -> Value {
        match accessor {
            "id" => json!(self.id),
            "host" => json!(self.host),
            "port" => json!(self.port),
            "last_seen" => json!(self.last_seen),
            _ => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_job_as_reported_by_scheduler() {
        let payload = r#"[{
            "job_id": "a1b2c3",
            "job_name": "tpch q1",
            "job_status": "Failed: executor lost",
            "num_stages": 4,
            "completed_stages": 1,
            "percent_complete": 25
        }]"#;

        let jobs: Vec<Job> = serde_json::from_str(payload).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].status, "Failed: executor lost");
        assert_eq!(jobs[0].state(), JobStatus::Failed);
        assert_eq!(jobs[0].job_name, "tpch q1");
        assert_eq!(jobs[0].percent_complete, 25.0);
    }

    #[test]
    fn decode_job_with_minimal_fields() {
        let payload = r#"{"job_id":"j1","status":"RUNNING","num_stages":3,"percent_complete":42}"#;

        let job: Job = serde_json::from_str(payload).unwrap();
        assert_eq!(job.state(), JobStatus::Running);
        assert_eq!(job.completed_stages, 0);
        assert!(job.job_name.is_empty());
    }

    #[test]
    fn status_is_classified_by_leading_word() {
        assert_eq!(
            JobStatus::classify(
                "Completed. Produced 2 partitions containing 10 rows. Elapsed time: 12 ms."
            ),
            JobStatus::Completed
        );
        assert_eq!(JobStatus::classify("queued"), JobStatus::Queued);
        assert_eq!(JobStatus::classify("Invalid State"), JobStatus::Unknown);
        assert_eq!(JobStatus::classify(""), JobStatus::Unknown);
    }

    #[test]
    fn unknown_status_does_not_fail_the_payload() {
        let payload = r#"[
            {"job_id":"j1","job_status":"Running","num_stages":3,"percent_complete":42},
            {"job_id":"j2","job_status":"Completed. Produced 1 partition.",
             "num_stages":1,"percent_complete":100},
            {"job_id":"j3","job_status":"Invalid State","num_stages":0,"percent_complete":0}
        ]"#;

        let jobs: Vec<Job> = serde_json::from_str(payload).unwrap();
        let states: Vec<JobStatus> = jobs.iter().map(Job::state).collect();
        assert_eq!(
            states,
            vec![JobStatus::Running, JobStatus::Completed, JobStatus::Unknown]
        );
        assert_eq!(jobs[2].value("status"), json!("Invalid State"));
    }

    #[test]
    fn decode_executor_without_last_seen() {
        let payload = r#"{"id":"e1","host":"localhost","port":50051,"last_seen":null}"#;
        let executor: ExecutorsData = serde_json::from_str(payload).unwrap();
        assert_eq!(executor.last_seen, None);
        assert_eq!(executor.value("port"), json!(50051));
    }

    #[test]
    fn job_row_values() {
        let job = Job {
            job_id: "j1".to_string(),
            job_name: String::new(),
            status: "Running".to_string(),
            num_stages: 3,
            completed_stages: 1,
            percent_complete: 42.0,
        };
        assert_eq!(job.value("job_id"), json!("j1"));
        assert_eq!(job.value("job_status"), json!("Running"));
        assert_eq!(job.value("num_stages"), json!(3));
        assert_eq!(job.value("missing"), Value::Null);
    }
}
