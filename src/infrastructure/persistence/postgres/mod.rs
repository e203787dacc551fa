//! # PostgreSQL Persistence
//!
//! PostgreSQL implementations of the repository ports using sqlx.
//!
//! The rate upsert is a single `INSERT ... ON CONFLICT DO UPDATE`
//! statement against the natural-key unique index, so concurrent editors
//! of the same slot cannot lose updates to a read-then-write race.
//!
//! Schema lives in `migrations/`; run them with `sqlx::migrate!` before
//! constructing the adapters.

use crate::domain::entities::{
    CoverageCountry, ExclusionSet, PriorityCity, Rate, RateKey, ResponseTimeExclusion,
    ServiceExclusion, Supplier,
};
use crate::domain::value_objects::{
    CityId, CountryCode, LocationScope, RateId, ServiceLevel, ServiceType, SupplierId, UsdCents,
};
use crate::infrastructure::persistence::traits::{
    CoverageRepository, ExclusionRepository, RateRepository, RepositoryError, RepositoryResult,
    SupplierRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

fn query_err(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
            RepositoryError::connection(e.to_string())
        }
        other => RepositoryError::query(other.to_string()),
    }
}

fn decode_scope(row: &PgRow) -> RepositoryResult<LocationScope> {
    let location_type: String = row
        .try_get("location_type")
        .map_err(|e| RepositoryError::serialization(e.to_string()))?;
    let country: String = row
        .try_get("country_code")
        .map_err(|e| RepositoryError::serialization(e.to_string()))?;
    let country = CountryCode::new(&country)
        .map_err(|e| RepositoryError::serialization(e.to_string()))?;

    match location_type.as_str() {
        "country" => Ok(LocationScope::country_wide(country)),
        "city" => {
            let city_id: Option<String> = row
                .try_get("city_id")
                .map_err(|e| RepositoryError::serialization(e.to_string()))?;
            let city_id = city_id.ok_or_else(|| {
                RepositoryError::serialization("city scope row without city_id")
            })?;
            Ok(LocationScope::city(CityId::new(city_id), country))
        }
        other => Err(RepositoryError::serialization(format!(
            "unknown location_type {other:?}"
        ))),
    }
}

fn decode_rate(row: &PgRow) -> RepositoryResult<Rate> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| RepositoryError::serialization(e.to_string()))?;
    let supplier_id: String = row
        .try_get("supplier_id")
        .map_err(|e| RepositoryError::serialization(e.to_string()))?;
    let service_type: String = row
        .try_get("service_type")
        .map_err(|e| RepositoryError::serialization(e.to_string()))?;
    let service_level: String = row
        .try_get("service_level")
        .map_err(|e| RepositoryError::serialization(e.to_string()))?;
    let amount: Option<i64> = row
        .try_get("amount_usd_cents")
        .map_err(|e| RepositoryError::serialization(e.to_string()))?;
    let serviceable: bool = row
        .try_get("serviceable")
        .map_err(|e| RepositoryError::serialization(e.to_string()))?;
    let version: i64 = row
        .try_get("version")
        .map_err(|e| RepositoryError::serialization(e.to_string()))?;
    let updated_at: DateTime<Utc> = row
        .try_get("updated_at")
        .map_err(|e| RepositoryError::serialization(e.to_string()))?;

    let key = RateKey::new(
        SupplierId::new(supplier_id),
        decode_scope(row)?,
        service_type
            .parse::<ServiceType>()
            .map_err(|e| RepositoryError::serialization(e.to_string()))?,
        service_level
            .parse::<ServiceLevel>()
            .map_err(|e| RepositoryError::serialization(e.to_string()))?,
    );

    let amount = amount
        .map(UsdCents::new)
        .transpose()
        .map_err(|e| RepositoryError::serialization(e.to_string()))?;

    Ok(Rate::from_parts(
        RateId::from_uuid(id),
        key,
        amount,
        serviceable,
        version.max(0) as u64,
        updated_at,
    ))
}

struct ScopeColumns<'a> {
    location_type: &'static str,
    country_code: &'a str,
    city_id: Option<&'a str>,
}

fn scope_columns(scope: &LocationScope) -> ScopeColumns<'_> {
    match scope {
        LocationScope::Country { country } => ScopeColumns {
            location_type: "country",
            country_code: country.as_str(),
            city_id: None,
        },
        LocationScope::City { id, country } => ScopeColumns {
            location_type: "city",
            country_code: country.as_str(),
            city_id: Some(id.as_str()),
        },
    }
}

/// PostgreSQL implementation of [`RateRepository`].
#[derive(Debug, Clone)]
pub struct PostgresRateRepository {
    pool: PgPool,
}

impl PostgresRateRepository {
    /// Creates a new PostgreSQL rate repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RateRepository for PostgresRateRepository {
    async fn upsert(&self, key: &RateKey, amount: Option<UsdCents>) -> RepositoryResult<Rate> {
        let scope = scope_columns(&key.scope);
        let row = sqlx::query(
            r#"
            INSERT INTO rates (
                id, supplier_id, location_type, country_code, city_id,
                service_type, service_level, amount_usd_cents, serviceable,
                version, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE, 0, NOW())
            ON CONFLICT (supplier_id, service_type, service_level,
                         country_code, COALESCE(city_id, ''))
            DO UPDATE SET
                amount_usd_cents = EXCLUDED.amount_usd_cents,
                version = rates.version + 1,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(key.supplier_id.as_str())
        .bind(scope.location_type)
        .bind(scope.country_code)
        .bind(scope.city_id)
        .bind(key.service_type.as_wire_str())
        .bind(key.service_level.as_str())
        .bind(amount.map(|a| a.cents()))
        .fetch_one(&self.pool)
        .await
        .map_err(query_err)?;

        decode_rate(&row)
    }

    async fn get(&self, key: &RateKey) -> RepositoryResult<Option<Rate>> {
        let scope = scope_columns(&key.scope);
        let row = sqlx::query(
            r#"
            SELECT * FROM rates
            WHERE supplier_id = $1 AND service_type = $2 AND service_level = $3
              AND country_code = $4 AND city_id IS NOT DISTINCT FROM $5
            "#,
        )
        .bind(key.supplier_id.as_str())
        .bind(key.service_type.as_wire_str())
        .bind(key.service_level.as_str())
        .bind(scope.country_code)
        .bind(scope.city_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_err)?;

        row.as_ref().map(decode_rate).transpose()
    }

    async fn find_by_supplier(&self, supplier_id: &SupplierId) -> RepositoryResult<Vec<Rate>> {
        let rows = sqlx::query("SELECT * FROM rates WHERE supplier_id = $1")
            .bind(supplier_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(query_err)?;

        rows.iter().map(decode_rate).collect()
    }

    async fn find_for_service(
        &self,
        service_type: ServiceType,
        service_level: ServiceLevel,
    ) -> RepositoryResult<Vec<Rate>> {
        let rows = sqlx::query(
            "SELECT * FROM rates WHERE service_type = $1 AND service_level = $2",
        )
        .bind(service_type.as_wire_str())
        .bind(service_level.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(query_err)?;

        rows.iter().map(decode_rate).collect()
    }

    async fn set_amount(&self, key: &RateKey, amount: UsdCents) -> RepositoryResult<bool> {
        let scope = scope_columns(&key.scope);
        let result = sqlx::query(
            r#"
            UPDATE rates
            SET amount_usd_cents = $6, version = version + 1, updated_at = NOW()
            WHERE supplier_id = $1 AND service_type = $2 AND service_level = $3
              AND country_code = $4 AND city_id IS NOT DISTINCT FROM $5
            "#,
        )
        .bind(key.supplier_id.as_str())
        .bind(key.service_type.as_wire_str())
        .bind(key.service_level.as_str())
        .bind(scope.country_code)
        .bind(scope.city_id)
        .bind(amount.cents())
        .execute(&self.pool)
        .await
        .map_err(query_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_serviceable(&self, key: &RateKey, serviceable: bool) -> RepositoryResult<bool> {
        let scope = scope_columns(&key.scope);
        let result = sqlx::query(
            r#"
            UPDATE rates
            SET serviceable = $6, version = version + 1, updated_at = NOW()
            WHERE supplier_id = $1 AND service_type = $2 AND service_level = $3
              AND country_code = $4 AND city_id IS NOT DISTINCT FROM $5
            "#,
        )
        .bind(key.supplier_id.as_str())
        .bind(key.service_type.as_wire_str())
        .bind(key.service_level.as_str())
        .bind(scope.country_code)
        .bind(scope.city_id)
        .bind(serviceable)
        .execute(&self.pool)
        .await
        .map_err(query_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, key: &RateKey) -> RepositoryResult<bool> {
        let scope = scope_columns(&key.scope);
        let result = sqlx::query(
            r#"
            DELETE FROM rates
            WHERE supplier_id = $1 AND service_type = $2 AND service_level = $3
              AND country_code = $4 AND city_id IS NOT DISTINCT FROM $5
            "#,
        )
        .bind(key.supplier_id.as_str())
        .bind(key.service_type.as_wire_str())
        .bind(key.service_level.as_str())
        .bind(scope.country_code)
        .bind(scope.city_id)
        .execute(&self.pool)
        .await
        .map_err(query_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rates")
            .fetch_one(&self.pool)
            .await
            .map_err(query_err)?;
        Ok(count.max(0) as u64)
    }
}

/// PostgreSQL implementation of [`SupplierRepository`].
#[derive(Debug, Clone)]
pub struct PostgresSupplierRepository {
    pool: PgPool,
}

impl PostgresSupplierRepository {
    /// Creates a new PostgreSQL supplier repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn decode_supplier(row: &PgRow) -> RepositoryResult<Supplier> {
    let id: String = row
        .try_get("id")
        .map_err(|e| RepositoryError::serialization(e.to_string()))?;
    let country: String = row
        .try_get("country_code")
        .map_err(|e| RepositoryError::serialization(e.to_string()))?;
    let offers_ooh: bool = row
        .try_get("offers_out_of_hours")
        .map_err(|e| RepositoryError::serialization(e.to_string()))?;
    let active: bool = row
        .try_get("active")
        .map_err(|e| RepositoryError::serialization(e.to_string()))?;
    let verified: bool = row
        .try_get("verified")
        .map_err(|e| RepositoryError::serialization(e.to_string()))?;

    let country = CountryCode::new(&country)
        .map_err(|e| RepositoryError::serialization(e.to_string()))?;
    Ok(Supplier::new(SupplierId::new(id), country)
        .with_out_of_hours(offers_ooh)
        .with_active(active)
        .with_verified(verified))
}

#[async_trait]
impl SupplierRepository for PostgresSupplierRepository {
    async fn save(&self, supplier: &Supplier) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO suppliers (id, country_code, offers_out_of_hours, active, verified)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                country_code = EXCLUDED.country_code,
                offers_out_of_hours = EXCLUDED.offers_out_of_hours,
                active = EXCLUDED.active,
                verified = EXCLUDED.verified
            "#,
        )
        .bind(supplier.id().as_str())
        .bind(supplier.country().as_str())
        .bind(supplier.offers_out_of_hours())
        .bind(supplier.is_active())
        .bind(supplier.is_verified())
        .execute(&self.pool)
        .await
        .map_err(query_err)?;
        Ok(())
    }

    async fn get(&self, id: &SupplierId) -> RepositoryResult<Option<Supplier>> {
        let row = sqlx::query("SELECT * FROM suppliers WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_err)?;
        row.as_ref().map(decode_supplier).transpose()
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Supplier>> {
        let rows = sqlx::query("SELECT * FROM suppliers")
            .fetch_all(&self.pool)
            .await
            .map_err(query_err)?;
        rows.iter().map(decode_supplier).collect()
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM suppliers")
            .fetch_one(&self.pool)
            .await
            .map_err(query_err)?;
        Ok(count.max(0) as u64)
    }
}

/// PostgreSQL implementation of [`CoverageRepository`].
#[derive(Debug, Clone)]
pub struct PostgresCoverageRepository {
    pool: PgPool,
}

impl PostgresCoverageRepository {
    /// Creates a new PostgreSQL coverage repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CoverageRepository for PostgresCoverageRepository {
    async fn add_country(&self, coverage: &CoverageCountry) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO coverage_countries (supplier_id, country_code)
            VALUES ($1, $2) ON CONFLICT DO NOTHING
            "#,
        )
        .bind(coverage.supplier_id().as_str())
        .bind(coverage.country().as_str())
        .execute(&self.pool)
        .await
        .map_err(query_err)?;
        Ok(())
    }

    async fn add_city(&self, city: &PriorityCity) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO priority_cities (supplier_id, city_id, country_code)
            VALUES ($1, $2, $3) ON CONFLICT DO NOTHING
            "#,
        )
        .bind(city.supplier_id().as_str())
        .bind(city.city_id().as_str())
        .bind(city.country().as_str())
        .execute(&self.pool)
        .await
        .map_err(query_err)?;
        Ok(())
    }

    async fn countries_for_supplier(
        &self,
        supplier_id: &SupplierId,
    ) -> RepositoryResult<Vec<CoverageCountry>> {
        let rows = sqlx::query(
            "SELECT country_code FROM coverage_countries WHERE supplier_id = $1",
        )
        .bind(supplier_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(query_err)?;

        rows.iter()
            .map(|row| {
                let code: String = row
                    .try_get("country_code")
                    .map_err(|e| RepositoryError::serialization(e.to_string()))?;
                let country = CountryCode::new(&code)
                    .map_err(|e| RepositoryError::serialization(e.to_string()))?;
                Ok(CoverageCountry::new(supplier_id.clone(), country))
            })
            .collect()
    }

    async fn cities_for_supplier(
        &self,
        supplier_id: &SupplierId,
    ) -> RepositoryResult<Vec<PriorityCity>> {
        let rows = sqlx::query(
            "SELECT city_id, country_code FROM priority_cities WHERE supplier_id = $1",
        )
        .bind(supplier_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(query_err)?;

        rows.iter()
            .map(|row| {
                let city: String = row
                    .try_get("city_id")
                    .map_err(|e| RepositoryError::serialization(e.to_string()))?;
                let code: String = row
                    .try_get("country_code")
                    .map_err(|e| RepositoryError::serialization(e.to_string()))?;
                let country = CountryCode::new(&code)
                    .map_err(|e| RepositoryError::serialization(e.to_string()))?;
                Ok(PriorityCity::new(
                    supplier_id.clone(),
                    CityId::new(city),
                    country,
                ))
            })
            .collect()
    }

    async fn suppliers_covering(
        &self,
        country: &CountryCode,
    ) -> RepositoryResult<Vec<SupplierId>> {
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT supplier_id FROM coverage_countries
            WHERE country_code = $1 ORDER BY supplier_id
            "#,
        )
        .bind(country.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(query_err)?;

        rows.iter()
            .map(|row| {
                let id: String = row
                    .try_get("supplier_id")
                    .map_err(|e| RepositoryError::serialization(e.to_string()))?;
                Ok(SupplierId::new(id))
            })
            .collect()
    }

    async fn has_priority_city(
        &self,
        supplier_id: &SupplierId,
        city_id: &CityId,
    ) -> RepositoryResult<bool> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM priority_cities WHERE supplier_id = $1 AND city_id = $2",
        )
        .bind(supplier_id.as_str())
        .bind(city_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(query_err)?;
        Ok(count > 0)
    }
}

/// PostgreSQL implementation of [`ExclusionRepository`].
#[derive(Debug, Clone)]
pub struct PostgresExclusionRepository {
    pool: PgPool,
}

impl PostgresExclusionRepository {
    /// Creates a new PostgreSQL exclusion repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExclusionRepository for PostgresExclusionRepository {
    async fn add_service_exclusion(&self, exclusion: &ServiceExclusion) -> RepositoryResult<()> {
        let scope = scope_columns(exclusion.scope());
        sqlx::query(
            r#"
            INSERT INTO service_exclusions
                (supplier_id, location_type, country_code, city_id, service_type)
            VALUES ($1, $2, $3, $4, $5) ON CONFLICT DO NOTHING
            "#,
        )
        .bind(exclusion.supplier_id().as_str())
        .bind(scope.location_type)
        .bind(scope.country_code)
        .bind(scope.city_id)
        .bind(exclusion.service_type().as_wire_str())
        .execute(&self.pool)
        .await
        .map_err(query_err)?;
        Ok(())
    }

    async fn remove_service_exclusion(
        &self,
        exclusion: &ServiceExclusion,
    ) -> RepositoryResult<bool> {
        let scope = scope_columns(exclusion.scope());
        let result = sqlx::query(
            r#"
            DELETE FROM service_exclusions
            WHERE supplier_id = $1 AND location_type = $2 AND country_code = $3
              AND city_id IS NOT DISTINCT FROM $4 AND service_type = $5
            "#,
        )
        .bind(exclusion.supplier_id().as_str())
        .bind(scope.location_type)
        .bind(scope.country_code)
        .bind(scope.city_id)
        .bind(exclusion.service_type().as_wire_str())
        .execute(&self.pool)
        .await
        .map_err(query_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_response_exclusion(
        &self,
        exclusion: &ResponseTimeExclusion,
    ) -> RepositoryResult<()> {
        let scope = scope_columns(exclusion.scope());
        sqlx::query(
            r#"
            INSERT INTO response_time_exclusions
                (supplier_id, location_type, country_code, city_id, service_type, service_level)
            VALUES ($1, $2, $3, $4, $5, $6) ON CONFLICT DO NOTHING
            "#,
        )
        .bind(exclusion.supplier_id().as_str())
        .bind(scope.location_type)
        .bind(scope.country_code)
        .bind(scope.city_id)
        .bind(exclusion.service_type().as_wire_str())
        .bind(exclusion.service_level().as_str())
        .execute(&self.pool)
        .await
        .map_err(query_err)?;
        Ok(())
    }

    async fn remove_response_exclusion(
        &self,
        exclusion: &ResponseTimeExclusion,
    ) -> RepositoryResult<bool> {
        let scope = scope_columns(exclusion.scope());
        let result = sqlx::query(
            r#"
            DELETE FROM response_time_exclusions
            WHERE supplier_id = $1 AND location_type = $2 AND country_code = $3
              AND city_id IS NOT DISTINCT FROM $4 AND service_type = $5
              AND service_level = $6
            "#,
        )
        .bind(exclusion.supplier_id().as_str())
        .bind(scope.location_type)
        .bind(scope.country_code)
        .bind(scope.city_id)
        .bind(exclusion.service_type().as_wire_str())
        .bind(exclusion.service_level().as_str())
        .execute(&self.pool)
        .await
        .map_err(query_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn exclusions_for(&self, supplier_id: &SupplierId) -> RepositoryResult<ExclusionSet> {
        let service_rows = sqlx::query(
            "SELECT * FROM service_exclusions WHERE supplier_id = $1",
        )
        .bind(supplier_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(query_err)?;

        let response_rows = sqlx::query(
            "SELECT * FROM response_time_exclusions WHERE supplier_id = $1",
        )
        .bind(supplier_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(query_err)?;

        let service = service_rows
            .iter()
            .map(|row| {
                let service_type: String = row
                    .try_get("service_type")
                    .map_err(|e| RepositoryError::serialization(e.to_string()))?;
                Ok(ServiceExclusion::new(
                    supplier_id.clone(),
                    decode_scope(row)?,
                    service_type
                        .parse::<ServiceType>()
                        .map_err(|e| RepositoryError::serialization(e.to_string()))?,
                ))
            })
            .collect::<RepositoryResult<Vec<_>>>()?;

        let response = response_rows
            .iter()
            .map(|row| {
                let service_type: String = row
                    .try_get("service_type")
                    .map_err(|e| RepositoryError::serialization(e.to_string()))?;
                let service_level: String = row
                    .try_get("service_level")
                    .map_err(|e| RepositoryError::serialization(e.to_string()))?;
                Ok(ResponseTimeExclusion::new(
                    supplier_id.clone(),
                    decode_scope(row)?,
                    service_type
                        .parse::<ServiceType>()
                        .map_err(|e| RepositoryError::serialization(e.to_string()))?,
                    service_level
                        .parse::<ServiceLevel>()
                        .map_err(|e| RepositoryError::serialization(e.to_string()))?,
                ))
            })
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok(ExclusionSet::from_records(service, response))
    }
}
