//! Medicines service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use medistore::{
    ids::IdPolicy,
    medicines::{Medicine, MedicineId, MedicinePatch, NewMedicine},
};
use mockall::automock;
use tokio::sync::Mutex;
use tracing::{Span, info};

use crate::{
    domain::medicines::{errors::MedicinesServiceError, repository::StorageCatalogRepository},
    storage::Storage,
};

/// Catalog store over a [`Storage`] document.
pub struct StorageMedicinesService {
    storage: Arc<dyn Storage>,
    repository: StorageCatalogRepository,
    policy: IdPolicy,
    write_lock: Mutex<()>,
}

impl Debug for StorageMedicinesService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StorageMedicinesService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl StorageMedicinesService {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, policy: IdPolicy) -> Self {
        Self {
            storage,
            repository: StorageCatalogRepository::new(),
            policy,
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl MedicinesService for StorageMedicinesService {
    async fn list_all(&self) -> Result<Vec<Medicine>, MedicinesServiceError> {
        let catalog = self.repository.load(self.storage.as_ref()).await?;

        Ok(catalog.medicines().to_vec())
    }

    async fn get_by_id(&self, id: MedicineId) -> Result<Medicine, MedicinesServiceError> {
        let catalog = self.repository.load(self.storage.as_ref()).await?;

        catalog
            .get(id)
            .cloned()
            .ok_or(MedicinesServiceError::NotFound(id))
    }

    async fn search(&self, query: &str) -> Result<Vec<Medicine>, MedicinesServiceError> {
        let catalog = self.repository.load(self.storage.as_ref()).await?;

        Ok(catalog.search(query))
    }

    async fn filter_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Medicine>, MedicinesServiceError> {
        let catalog = self.repository.load(self.storage.as_ref()).await?;

        Ok(catalog.filter_by_category(category))
    }

    async fn list_featured(&self) -> Result<Vec<Medicine>, MedicinesServiceError> {
        let catalog = self.repository.load(self.storage.as_ref()).await?;

        Ok(catalog.featured())
    }

    async fn list_low_stock(&self) -> Result<Vec<Medicine>, MedicinesServiceError> {
        let catalog = self.repository.load(self.storage.as_ref()).await?;

        Ok(catalog.low_stock())
    }

    #[tracing::instrument(
        name = "medicines.service.update_stock",
        skip(self),
        fields(medicine_id = %id),
        err
    )]
    async fn update_stock(
        &self,
        id: MedicineId,
        stock: u32,
    ) -> Result<Medicine, MedicinesServiceError> {
        let _guard = self.write_lock.lock().await;

        let mut catalog = self.repository.load(self.storage.as_ref()).await?;
        let updated = catalog.update_stock(id, stock)?;

        self.repository.save(self.storage.as_ref(), &catalog).await?;

        info!(medicine_id = %id, stock, "updated stock");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "medicines.service.create",
        skip(self, medicine),
        fields(
            medicine_id = tracing::field::Empty,
            requires_prescription = medicine.requires_prescription
        ),
        err
    )]
    async fn create(&self, medicine: NewMedicine) -> Result<Medicine, MedicinesServiceError> {
        let _guard = self.write_lock.lock().await;

        let mut catalog = self.repository.load(self.storage.as_ref()).await?;
        let created = catalog.create(medicine, self.policy)?;

        self.repository.save(self.storage.as_ref(), &catalog).await?;

        Span::current().record("medicine_id", tracing::field::display(created.id));

        info!(medicine_id = %created.id, name = %created.name, "created medicine");

        Ok(created)
    }

    #[tracing::instrument(
        name = "medicines.service.import",
        skip(self, medicines),
        fields(count = medicines.len()),
        err
    )]
    async fn import(
        &self,
        medicines: Vec<NewMedicine>,
    ) -> Result<Vec<Medicine>, MedicinesServiceError> {
        let _guard = self.write_lock.lock().await;

        let mut catalog = self.repository.load(self.storage.as_ref()).await?;

        let created = medicines
            .into_iter()
            .map(|medicine| catalog.create(medicine, self.policy))
            .collect::<Result<Vec<_>, _>>()?;

        self.repository.save(self.storage.as_ref(), &catalog).await?;

        info!(count = created.len(), "imported medicines");

        Ok(created)
    }

    #[tracing::instrument(
        name = "medicines.service.update",
        skip(self, patch),
        fields(medicine_id = %id),
        err
    )]
    async fn update(
        &self,
        id: MedicineId,
        patch: MedicinePatch,
    ) -> Result<Medicine, MedicinesServiceError> {
        let _guard = self.write_lock.lock().await;

        let mut catalog = self.repository.load(self.storage.as_ref()).await?;
        let updated = catalog.update(id, patch)?;

        self.repository.save(self.storage.as_ref(), &catalog).await?;

        info!(medicine_id = %id, "updated medicine");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "medicines.service.delete",
        skip(self),
        fields(medicine_id = %id),
        err
    )]
    async fn delete(&self, id: MedicineId) -> Result<Medicine, MedicinesServiceError> {
        let _guard = self.write_lock.lock().await;

        let mut catalog = self.repository.load(self.storage.as_ref()).await?;
        let deleted = catalog.delete(id)?;

        self.repository.save(self.storage.as_ref(), &catalog).await?;

        info!(medicine_id = %id, "deleted medicine");

        Ok(deleted)
    }
}

#[automock]
#[async_trait]
pub trait MedicinesService: Send + Sync {
    /// Every medicine in catalog order.
    async fn list_all(&self) -> Result<Vec<Medicine>, MedicinesServiceError>;

    /// Retrieve a single medicine.
    async fn get_by_id(&self, id: MedicineId) -> Result<Medicine, MedicinesServiceError>;

    /// Case-insensitive substring search over name, generic name and brand.
    async fn search(&self, query: &str) -> Result<Vec<Medicine>, MedicinesServiceError>;

    /// Medicines in the given category, ignoring case.
    async fn filter_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Medicine>, MedicinesServiceError>;

    /// The first six medicines in catalog order.
    async fn list_featured(&self) -> Result<Vec<Medicine>, MedicinesServiceError>;

    /// Medicines running low or out of stock.
    async fn list_low_stock(&self) -> Result<Vec<Medicine>, MedicinesServiceError>;

    /// Set the stock count of a medicine.
    async fn update_stock(
        &self,
        id: MedicineId,
        stock: u32,
    ) -> Result<Medicine, MedicinesServiceError>;

    /// Assign an id and append a medicine to the catalog.
    async fn create(&self, medicine: NewMedicine) -> Result<Medicine, MedicinesServiceError>;

    /// Append many medicines in one write. Nothing is stored if any is invalid.
    async fn import(
        &self,
        medicines: Vec<NewMedicine>,
    ) -> Result<Vec<Medicine>, MedicinesServiceError>;

    /// Merge the present fields of `patch` into a medicine.
    async fn update(
        &self,
        id: MedicineId,
        patch: MedicinePatch,
    ) -> Result<Medicine, MedicinesServiceError>;

    /// Remove a medicine and return it.
    async fn delete(&self, id: MedicineId) -> Result<Medicine, MedicinesServiceError>;
}

#[cfg(test)]
mod tests {
    use medistore::medicines::CatalogError;
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::aspirin};

    use super::*;

    #[tokio::test]
    async fn create_assigns_sequential_ids() -> TestResult {
        let ctx = TestContext::new();

        let first = ctx.medicines.create(aspirin()).await?;
        let second = ctx.medicines.create(aspirin()).await?;

        assert_eq!(first.id, MedicineId::new(1));
        assert_eq!(second.id, MedicineId::new(2));

        Ok(())
    }

    #[tokio::test]
    async fn get_by_id_unknown_returns_not_found() {
        let ctx = TestContext::new();

        let result = ctx.medicines.get_by_id(MedicineId::new(42)).await;

        assert!(
            matches!(result, Err(MedicinesServiceError::NotFound(id)) if id == MedicineId::new(42)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let ctx = TestContext::new();

        let result = ctx
            .medicines
            .create(NewMedicine {
                name: "   ".to_string(),
                ..aspirin()
            })
            .await;

        assert!(
            matches!(
                result,
                Err(MedicinesServiceError::InvalidData(CatalogError::BlankName))
            ),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_stock_is_persisted() -> TestResult {
        let ctx = TestContext::new();
        let medicine = ctx.medicines.create(aspirin()).await?;

        ctx.medicines.update_stock(medicine.id, 3).await?;

        let low = ctx.medicines.list_low_stock().await?;

        assert_eq!(ctx.medicines.get_by_id(medicine.id).await?.stock, 3);
        assert_eq!(low.iter().map(|m| m.id).collect::<Vec<_>>(), vec![medicine.id]);

        Ok(())
    }

    #[tokio::test]
    async fn update_merges_present_fields() -> TestResult {
        let ctx = TestContext::new();
        let medicine = ctx.medicines.create(aspirin()).await?;

        let updated = ctx
            .medicines
            .update(
                medicine.id,
                MedicinePatch {
                    price: Some(12_50),
                    ..MedicinePatch::default()
                },
            )
            .await?;

        assert_eq!(updated.price, 12_50);
        assert_eq!(updated.name, medicine.name);

        Ok(())
    }

    #[tokio::test]
    async fn delete_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new();
        let medicine = ctx.medicines.create(aspirin()).await?;

        let deleted = ctx.medicines.delete(medicine.id).await?;
        let result = ctx.medicines.get_by_id(medicine.id).await;

        assert_eq!(deleted, medicine);
        assert!(
            matches!(result, Err(MedicinesServiceError::NotFound(_))),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn monotonic_ids_are_never_reused() -> TestResult {
        let ctx = TestContext::new();

        for _ in 0..3 {
            ctx.medicines.create(aspirin()).await?;
        }

        ctx.medicines.delete(MedicineId::new(3)).await?;

        let created = ctx.medicines.create(aspirin()).await?;

        assert_eq!(created.id, MedicineId::new(4));

        Ok(())
    }

    #[tokio::test]
    async fn reuse_freed_ids_follow_the_highest_remaining() -> TestResult {
        let ctx = TestContext::with_policy(IdPolicy::ReuseFreed);

        for _ in 0..3 {
            ctx.medicines.create(aspirin()).await?;
        }

        ctx.medicines.delete(MedicineId::new(3)).await?;

        let created = ctx.medicines.create(aspirin()).await?;

        assert_eq!(created.id, MedicineId::new(3));

        Ok(())
    }

    #[tokio::test]
    async fn import_is_all_or_nothing() -> TestResult {
        let ctx = TestContext::new();

        let result = ctx
            .medicines
            .import(vec![
                aspirin(),
                NewMedicine {
                    name: String::new(),
                    ..aspirin()
                },
            ])
            .await;

        assert!(result.is_err());
        assert!(ctx.medicines.list_all().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_creates_never_lose_writes() -> TestResult {
        let ctx = TestContext::new();
        let medicines = ctx.medicines.clone();

        let tasks: Vec<_> = (0..10)
            .map(|_| {
                let medicines = medicines.clone();
                tokio::spawn(async move { medicines.create(aspirin()).await })
            })
            .collect();

        for task in tasks {
            task.await??;
        }

        assert_eq!(ctx.medicines.list_all().await?.len(), 10);

        Ok(())
    }
}
