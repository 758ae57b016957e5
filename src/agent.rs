//! SQL Chat Agent
//!
//! The query pipeline: cached schema introspection → prompt construction →
//! SQL generation via the LLM → denylist safety validation → execution →
//! result narration. Each request flows through once, left to right; any
//! failure is terminal for that request and becomes a structured
//! [`QueryOutcome::Failure`], never a panic.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::database::{DatabaseService, ResultSet};
use crate::error::{AgentError, AgentResult, LlmError};
use crate::llm_client::LlmClient;
use crate::schema;

/// Statement keywords that disqualify a generated query from execution.
///
/// This is a raw substring scan over the uppercased text, not statement
/// analysis. It is conservative: a legitimate SELECT whose literals mention
/// one of these words is rejected too.
const DANGEROUS_KEYWORDS: [&str; 7] = [
    "DROP", "DELETE", "UPDATE", "INSERT", "ALTER", "TRUNCATE", "CREATE",
];

/// Terminal result of one full pipeline run.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    Success {
        sql_query: String,
        results: ResultSet,
        response: String,
    },
    Failure {
        error: String,
        /// The generated SQL, when one existed by the time of failure.
        sql_query: Option<String>,
    },
}

/// Chatbot agent that converts natural language to SQL and narrates results.
pub struct SqlChatAgent {
    llm: Arc<dyn LlmClient>,
    db: Arc<dyn DatabaseService>,
    schema: OnceCell<String>,
}

impl SqlChatAgent {
    pub fn new(llm: Arc<dyn LlmClient>, db: Arc<dyn DatabaseService>) -> Self {
        Self {
            llm,
            db,
            schema: OnceCell::new(),
        }
    }

    /// Schema description, computed once and reused for the process lifetime.
    ///
    /// There is no invalidation; a schema change requires a restart. Two
    /// requests racing on first use both compute the same text, and only one
    /// value is stored.
    pub async fn schema(&self) -> AgentResult<&str> {
        let schema = self
            .schema
            .get_or_try_init(|| async { schema::describe_schema(self.db.as_ref()).await })
            .await?;
        Ok(schema.as_str())
    }

    /// Convert a natural-language question into a single SQL statement.
    ///
    /// Purely textual: one LLM call, then fence stripping. No semantic
    /// validation of the returned SQL happens here.
    pub async fn generate_sql(&self, question: &str, schema: &str) -> Result<String, LlmError> {
        let prompt = build_generation_prompt(question, schema);
        let response = self.llm.complete(&prompt).await?;
        Ok(strip_code_fences(&response))
    }

    /// Turn the executed query and its rows into a conversational answer.
    pub async fn narrate(
        &self,
        question: &str,
        sql: &str,
        results: &ResultSet,
    ) -> Result<String, LlmError> {
        let prompt = build_narration_prompt(question, sql, results);
        let response = self.llm.complete(&prompt).await?;
        Ok(response.trim().to_string())
    }

    /// Process a natural-language question end-to-end.
    pub async fn process(&self, question: &str) -> QueryOutcome {
        // Schema fetch and generation; no SQL string exists yet on failure.
        let sql_query = match self.generate(question).await {
            Ok(sql) => sql,
            Err(e) => {
                warn!(error = %e, "SQL generation failed");
                return QueryOutcome::Failure {
                    error: e.to_string(),
                    sql_query: None,
                };
            }
        };

        if !is_safe(&sql_query) {
            warn!(sql = %sql_query, "rejected statement with disallowed operations");
            return QueryOutcome::Failure {
                error: AgentError::UnsafeStatement.to_string(),
                sql_query: Some(sql_query),
            };
        }

        let results = match self.db.execute(&sql_query).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(sql = %sql_query, error = %e, "query execution failed");
                return QueryOutcome::Failure {
                    error: e.to_string(),
                    sql_query: Some(sql_query),
                };
            }
        };

        info!(sql = %sql_query, rows = results.len(), "query executed");

        // Narration failure discards the already-fetched rows.
        match self.narrate(question, &sql_query, &results).await {
            Ok(response) => QueryOutcome::Success {
                sql_query,
                results,
                response,
            },
            Err(e) => {
                warn!(sql = %sql_query, error = %e, "narration failed");
                QueryOutcome::Failure {
                    error: e.to_string(),
                    sql_query: Some(sql_query),
                }
            }
        }
    }

    async fn generate(&self, question: &str) -> AgentResult<String> {
        let schema = self.schema().await?;
        let sql = self.generate_sql(question, schema).await?;
        Ok(sql)
    }
}

/// Check a statement against the keyword denylist.
pub fn is_safe(sql: &str) -> bool {
    let upper = sql.to_uppercase();
    !DANGEROUS_KEYWORDS.iter().any(|kw| upper.contains(kw))
}

fn build_generation_prompt(question: &str, schema: &str) -> String {
    format!(
        r#"You are a SQL expert. Convert the following natural language query into a valid MySQL query.

Database Schema:
{schema}

User Question: {question}

Rules:
1. Return ONLY the SQL query, nothing else
2. Use proper MySQL syntax
3. Make sure the query is safe (no DROP, DELETE, UPDATE, or other destructive operations)
4. Use appropriate JOINs if multiple tables are involved
5. Add LIMIT clause if appropriate to avoid returning too many results

SQL Query:"#
    )
}

fn build_narration_prompt(question: &str, sql: &str, results: &ResultSet) -> String {
    let results_json =
        serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"You are a helpful assistant. The user asked: "{question}"

The following SQL query was executed:
{sql}

Query Results (as JSON):
{results_json}

Please provide a natural, conversational response to the user's question based on these results.
- Be concise but informative
- Format numbers and dates nicely
- If there are many results, summarize them appropriately
- If there are no results, say so politely

Response:"#
    )
}

/// Strip a surrounding fenced code block from a completion.
///
/// The first and last fence lines are removed only when at least three lines
/// are present; shorter fenced completions are left as-is so content is never
/// destroyed. A leading `sql` language tag left behind by an inline fence is
/// stripped as well.
fn strip_code_fences(text: &str) -> String {
    let text = text.trim();
    let mut sql = text.to_string();

    if text.starts_with("```") {
        let lines: Vec<&str> = text.split('\n').collect();
        if lines.len() > 2 {
            sql = lines[1..lines.len() - 1].join("\n");
        }
        if let Some(rest) = sql.strip_prefix("sql") {
            sql = rest.trim().to_string();
        }
    }

    sql.trim().to_string()
}
