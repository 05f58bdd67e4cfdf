//! Sales quotation service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{line_subtotal, quotation_totals, Role};

/// Sales quotation service
#[derive(Clone)]
pub struct QuotationService {
    db: PgPool,
    reports_dir: String,
    public_url: String,
}

/// Input for creating a quotation
#[derive(Debug, Deserialize)]
pub struct CreateQuotationInput {
    pub customer_id: Uuid,
    pub observations: Option<String>,
    pub quoted_products: Vec<QuotedProductInput>,
}

/// A quotation line item in the input
#[derive(Debug, Deserialize)]
pub struct QuotedProductInput {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Quotation with joined display fields and line items
#[derive(Debug, Clone, Serialize)]
pub struct QuotationRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub subtotal: Decimal,
    pub vat: Decimal,
    pub total: Decimal,
    pub observations: Option<String>,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub user_id: Uuid,
    pub user_name: String,
    pub quoted_products: Vec<QuotedProductRecord>,
    pub created_at: DateTime<Utc>,
}

/// A quotation line item with its product name
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QuotedProductRecord {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// Response after exporting a quotation document
#[derive(Debug, Serialize)]
pub struct QuotationExportResponse {
    pub message: String,
    pub url: String,
}

#[derive(Debug, FromRow)]
struct QuotationRow {
    id: Uuid,
    date: NaiveDate,
    subtotal: Decimal,
    tax: Decimal,
    total: Decimal,
    notes: Option<String>,
    customer_id: Uuid,
    customer_name: String,
    user_id: Uuid,
    user_name: String,
    created_at: DateTime<Utc>,
}

const QUOTATION_SELECT: &str = r#"
    SELECT q.id, q.date, q.subtotal, q.tax, q.total, q.notes,
           q.customer_id, c.name AS customer_name,
           q.user_id, u.name AS user_name,
           q.created_at
    FROM quotations q
    JOIN customers c ON c.id = q.customer_id
    JOIN users u ON u.id = q.user_id
"#;

impl QuotationService {
    /// Create a new QuotationService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            reports_dir: config.storage.reports_dir.clone(),
            public_url: config.storage.public_url.clone(),
        }
    }

    /// Create a quotation with its line items
    ///
    /// Totals are computed server-side: line subtotals, 15% VAT and the
    /// grand total. Lines and header are inserted in one transaction.
    pub async fn create_quotation(
        &self,
        user_id: Uuid,
        input: CreateQuotationInput,
    ) -> AppResult<QuotationRecord> {
        if input.quoted_products.is_empty() {
            return Err(AppError::Validation {
                field: "quoted_products".to_string(),
                message: "At least one product is required".to_string(),
                message_es: "Se requiere al menos un producto".to_string(),
            });
        }

        for line in &input.quoted_products {
            if line.quantity <= 0 || line.unit_price < Decimal::ZERO {
                return Err(AppError::Validation {
                    field: "quoted_products".to_string(),
                    message: "Invalid product data: quantity must be positive and price non-negative"
                        .to_string(),
                    message_es: "Datos inválidos en productos".to_string(),
                });
            }
        }

        let customer_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM customers WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(input.customer_id)
        .fetch_one(&self.db)
        .await?;

        if !customer_exists {
            return Err(AppError::NotFound("Customer".to_string()));
        }

        let lines: Vec<(i32, Decimal)> = input
            .quoted_products
            .iter()
            .map(|line| (line.quantity, line.unit_price))
            .collect();
        let totals = quotation_totals(&lines);

        let mut tx = self.db.begin().await?;

        let quotation_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO quotations (date, subtotal, tax, total, notes, customer_id, user_id)
            VALUES (CURRENT_DATE, $1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(totals.subtotal)
        .bind(totals.tax)
        .bind(totals.total)
        .bind(&input.observations)
        .bind(input.customer_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        for line in &input.quoted_products {
            let product_exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM products WHERE id = $1 AND deleted_at IS NULL)",
            )
            .bind(line.product_id)
            .fetch_one(&mut *tx)
            .await?;

            if !product_exists {
                return Err(AppError::NotFound("Product".to_string()));
            }

            sqlx::query(
                r#"
                INSERT INTO quoted_products (quotation_id, product_id, quantity, unit_price, subtotal)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(quotation_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.unit_price)
            .bind(line_subtotal(line.quantity, line.unit_price))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_quotation(quotation_id).await
    }

    /// List quotations, newest first
    ///
    /// Administrators see every quotation; regular users only their own.
    pub async fn list_quotations(&self, user_id: Uuid, role: Role) -> AppResult<Vec<QuotationRecord>> {
        let rows = match role {
            Role::Administrator => {
                sqlx::query_as::<_, QuotationRow>(&format!(
                    "{} WHERE q.deleted_at IS NULL ORDER BY q.date DESC, q.created_at DESC",
                    QUOTATION_SELECT
                ))
                .fetch_all(&self.db)
                .await?
            }
            Role::User => {
                sqlx::query_as::<_, QuotationRow>(&format!(
                    "{} WHERE q.user_id = $1 AND q.deleted_at IS NULL \
                     ORDER BY q.date DESC, q.created_at DESC",
                    QUOTATION_SELECT
                ))
                .bind(user_id)
                .fetch_all(&self.db)
                .await?
            }
        };

        let mut quotations = Vec::with_capacity(rows.len());
        for row in rows {
            let lines = self.get_lines(row.id).await?;
            quotations.push(Self::into_record(row, lines));
        }

        Ok(quotations)
    }

    /// Get a quotation by id
    pub async fn get_quotation(&self, quotation_id: Uuid) -> AppResult<QuotationRecord> {
        let row = sqlx::query_as::<_, QuotationRow>(&format!(
            "{} WHERE q.id = $1 AND q.deleted_at IS NULL",
            QUOTATION_SELECT
        ))
        .bind(quotation_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Quotation".to_string()))?;

        let lines = self.get_lines(row.id).await?;
        Ok(Self::into_record(row, lines))
    }

    /// Export a quotation as a CSV document and record it as a report
    pub async fn export_quotation(
        &self,
        user_id: Uuid,
        quotation_id: Uuid,
    ) -> AppResult<QuotationExportResponse> {
        let quotation = self.get_quotation(quotation_id).await?;

        let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(vec![]);
        let write_err =
            |e: csv::Error| AppError::Internal(format!("CSV serialization error: {}", e));

        let date = quotation.date.format("%d/%m/%Y").to_string();

        wtr.write_record(["COTIZACIÓN"]).map_err(write_err)?;
        wtr.write_record(["Fecha", date.as_str()]).map_err(write_err)?;
        wtr.write_record(["Cliente", quotation.customer_name.as_str()])
            .map_err(write_err)?;
        wtr.write_record(["Vendedor", quotation.user_name.as_str()])
            .map_err(write_err)?;
        wtr.write_record([""]).map_err(write_err)?;
        wtr.write_record(["Producto", "Cantidad", "Precio Unitario", "Subtotal"])
            .map_err(write_err)?;

        for line in &quotation.quoted_products {
            let quantity = line.quantity.to_string();
            let unit_price = format!("{:.2}", line.unit_price);
            let subtotal = format!("{:.2}", line.subtotal);
            wtr.write_record([
                line.product_name.as_str(),
                quantity.as_str(),
                unit_price.as_str(),
                subtotal.as_str(),
            ])
            .map_err(write_err)?;
        }

        let subtotal = format!("{:.2}", quotation.subtotal);
        let vat = format!("{:.2}", quotation.vat);
        let total = format!("{:.2}", quotation.total);

        wtr.write_record([""]).map_err(write_err)?;
        wtr.write_record(["Subtotal", subtotal.as_str()]).map_err(write_err)?;
        wtr.write_record(["IVA (15%)", vat.as_str()]).map_err(write_err)?;
        wtr.write_record(["Total", total.as_str()]).map_err(write_err)?;

        if let Some(observations) = &quotation.observations {
            wtr.write_record([""]).map_err(write_err)?;
            wtr.write_record(["Observaciones", observations.as_str()])
                .map_err(write_err)?;
        }

        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;

        let now = Utc::now().format("%Y-%m-%d_%H-%M-%S");
        let filename = format!("quotation_{}_{}.csv", quotation.id, now);

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

        Ok(QuotationExportResponse {
            message: "Quotation document generated successfully".to_string(),
            url: format!("{}/{}", self.public_url, filename),
        })
    }

    async fn get_lines(&self, quotation_id: Uuid) -> AppResult<Vec<QuotedProductRecord>> {
        let lines = sqlx::query_as::<_, QuotedProductRecord>(
            r#"
            SELECT qp.product_id, p.name AS product_name, qp.quantity, qp.unit_price, qp.subtotal
            FROM quoted_products qp
            JOIN products p ON p.id = qp.product_id
            WHERE qp.quotation_id = $1 AND qp.deleted_at IS NULL
            ORDER BY qp.created_at
            "#,
        )
        .bind(quotation_id)
        .fetch_all(&self.db)
        .await?;

        Ok(lines)
    }

    fn into_record(row: QuotationRow, lines: Vec<QuotedProductRecord>) -> QuotationRecord {
        QuotationRecord {
            id: row.id,
            date: row.date,
            subtotal: row.subtotal,
            vat: row.tax,
            total: row.total,
            observations: row.notes,
            customer_id: row.customer_id,
            customer_name: row.customer_name,
            user_id: row.user_id,
            user_name: row.user_name,
            quoted_products: lines,
            created_at: row.created_at,
        }
    }
}
