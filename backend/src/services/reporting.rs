//! Reporting service for generated exports and the dashboard summary

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{Report, ReportType};

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
    reports_dir: String,
    public_url: String,
}

/// Input for generating a report
#[derive(Debug, Deserialize)]
pub struct GenerateReportInput {
    #[serde(rename = "type", default)]
    pub report_type: ReportType,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Response after generating a report
#[derive(Debug, Serialize)]
pub struct GenerateReportResponse {
    pub message: String,
    pub url: String,
}

/// Dashboard summary counters
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_products: i64,
    pub total_customers: i64,
    pub total_movements: i64,
    pub total_entries: i64,
    pub total_exits: i64,
    pub low_stock_alerts: i64,
    pub total_sales: i64,
}

/// Row for the movements report
#[derive(Debug, FromRow)]
struct MovementReportRow {
    date: DateTime<Utc>,
    movement_type: String,
    product_name: String,
    quantity: i32,
    counterparty: String,
    user_name: String,
}

/// Row for the top-products report
#[derive(Debug, FromRow)]
struct TopProductRow {
    product_name: String,
    total_sold: i64,
}

impl ReportingService {
    /// Create a new ReportingService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            reports_dir: config.storage.reports_dir.clone(),
            public_url: config.storage.public_url.clone(),
        }
    }

    /// Generate a report file and record it for later download
    pub async fn generate_report(
        &self,
        user_id: Uuid,
        input: GenerateReportInput,
    ) -> AppResult<GenerateReportResponse> {
        let start = input
            .start_date
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc());
        let end = input
            .end_date
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc() + Duration::days(1) - Duration::seconds(1));

        let csv_data = match input.report_type {
            ReportType::Movements => self.movements_csv(start, end).await?,
            ReportType::TopProducts => self.top_products_csv(start, end).await?,
        };

        let now = Utc::now().format("%Y-%m-%d_%H-%M-%S");
        let filename = format!("report_{}_{}.csv", input.report_type.as_str(), now);

        let dir = std::path::Path::new(&self.reports_dir);
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::StorageError(e.to_string()))?;
        tokio::fs::write(dir.join(&filename), &csv_data)
            .await
            .map_err(|e| AppError::StorageError(e.to_string()))?;

        sqlx::query("INSERT INTO reports (file, user_id) VALUES ($1, $2)")
            .bind(&filename)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        tracing::info!(user_id = %user_id, filename = %filename, "Report generated");

        Ok(GenerateReportResponse {
            message: "Report generated successfully".to_string(),
            url: format!("{}/{}", self.public_url, filename),
        })
    }

    /// List reports generated by a user, newest first
    pub async fn list_reports(&self, user_id: Uuid) -> AppResult<Vec<Report>> {
        let reports = sqlx::query_as::<_, (Uuid, String, Uuid, DateTime<Utc>)>(
            r#"
            SELECT id, file, user_id, generated_at
            FROM reports
            WHERE user_id = $1
            ORDER BY generated_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(reports
            .into_iter()
            .map(|(id, file, user_id, generated_at)| Report {
                id,
                file,
                user_id,
                generated_at,
            })
            .collect())
    }

    /// Get dashboard summary counters
    pub async fn dashboard_summary(&self) -> AppResult<DashboardSummary> {
        let total_products: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE deleted_at IS NULL")
                .fetch_one(&self.db)
                .await?;

        let total_customers: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM customers WHERE deleted_at IS NULL")
                .fetch_one(&self.db)
                .await?;

        let total_movements: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM movements WHERE deleted_at IS NULL")
                .fetch_one(&self.db)
                .await?;

        let total_entries: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM movements WHERE movement_type = 'input' AND deleted_at IS NULL",
        )
        .fetch_one(&self.db)
        .await?;

        let total_exits: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM movements WHERE movement_type = 'output' AND deleted_at IS NULL",
        )
        .fetch_one(&self.db)
        .await?;

        let low_stock_alerts: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM alerts WHERE deleted_at IS NULL")
                .fetch_one(&self.db)
                .await?;

        let total_sales: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(quantity), 0)::BIGINT
            FROM movements
            WHERE movement_type = 'output' AND deleted_at IS NULL
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        Ok(DashboardSummary {
            total_products,
            total_customers,
            total_movements,
            total_entries,
            total_exits,
            low_stock_alerts,
            total_sales,
        })
    }

    /// Build the CSV for the 50 most recent movements in the range
    async fn movements_csv(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> AppResult<String> {
        let rows = sqlx::query_as::<_, MovementReportRow>(
            r#"
            SELECT m.date, m.movement_type, p.name AS product_name, m.quantity,
                   CASE
                       WHEN m.movement_type = 'output' THEN COALESCE(c.name, '')
                       ELSE COALESCE(s.name, '')
                   END AS counterparty,
                   u.name AS user_name
            FROM movements m
            JOIN products p ON p.id = m.product_id
            LEFT JOIN suppliers s ON s.id = p.supplier_id
            LEFT JOIN customers c ON c.id = m.customer_id
            JOIN users u ON u.id = m.user_id
            WHERE m.deleted_at IS NULL
              AND ($1::timestamptz IS NULL OR m.date >= $1)
              AND ($2::timestamptz IS NULL OR m.date <= $2)
            ORDER BY m.date DESC
            LIMIT 50
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        let mut wtr = csv::Writer::from_writer(vec![]);
        let write_err =
            |e: csv::Error| AppError::Internal(format!("CSV serialization error: {}", e));

        wtr.write_record(["Fecha", "Tipo", "Producto", "Cantidad", "Cliente / Proveedor", "Usuario"])
            .map_err(write_err)?;

        for row in rows {
            let movement_type = if row.movement_type == "input" {
                "Entrada"
            } else {
                "Salida"
            };
            let date = row.date.format("%d/%m/%Y %H:%M").to_string();
            let quantity = row.quantity.to_string();
            wtr.write_record([
                date.as_str(),
                movement_type,
                row.product_name.as_str(),
                quantity.as_str(),
                row.counterparty.as_str(),
                row.user_name.as_str(),
            ])
            .map_err(write_err)?;
        }

        Self::finish_csv(wtr)
    }

    /// Build the CSV for the 10 best-selling products in the range
    async fn top_products_csv(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> AppResult<String> {
        let rows = sqlx::query_as::<_, TopProductRow>(
            r#"
            SELECT p.name AS product_name, SUM(m.quantity)::BIGINT AS total_sold
            FROM movements m
            JOIN products p ON p.id = m.product_id
            WHERE m.movement_type = 'output'
              AND m.deleted_at IS NULL
              AND ($1::timestamptz IS NULL OR m.date >= $1)
              AND ($2::timestamptz IS NULL OR m.date <= $2)
            GROUP BY p.name
            ORDER BY total_sold DESC
            LIMIT 10
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        let mut wtr = csv::Writer::from_writer(vec![]);
        let write_err =
            |e: csv::Error| AppError::Internal(format!("CSV serialization error: {}", e));

        wtr.write_record(["Producto", "Cantidad Vendida"]).map_err(write_err)?;

        for row in rows {
            let total_sold = row.total_sold.to_string();
            wtr.write_record([row.product_name.as_str(), total_sold.as_str()])
                .map_err(write_err)?;
        }

        Self::finish_csv(wtr)
    }

    fn finish_csv(wtr: csv::Writer<Vec<u8>>) -> AppResult<String> {
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}
