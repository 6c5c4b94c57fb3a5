use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::*;
use tracing::info;

use crate::entity::{artwork, commission, contact};

/// Ensure the composite indexes behind the listing queries exist.
///
/// SeaORM's schema-sync doesn't support composite non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let statements = [
        // Category pages: WHERE category = ? ORDER BY created_at DESC
        (
            "idx_artwork_category_created",
            Index::create()
                .if_not_exists()
                .name("idx_artwork_category_created")
                .table(artwork::Entity)
                .col(artwork::Column::Category)
                .col(artwork::Column::CreatedAt)
                .to_string(PostgresQueryBuilder),
        ),
        // Inbox: WHERE is_read = false ORDER BY created_at DESC
        (
            "idx_contact_read_created",
            Index::create()
                .if_not_exists()
                .name("idx_contact_read_created")
                .table(contact::Entity)
                .col(contact::Column::IsRead)
                .col(contact::Column::CreatedAt)
                .to_string(PostgresQueryBuilder),
        ),
        (
            "idx_commission_status_created",
            Index::create()
                .if_not_exists()
                .name("idx_commission_status_created")
                .table(commission::Entity)
                .col(commission::Column::Status)
                .col(commission::Column::CreatedAt)
                .to_string(PostgresQueryBuilder),
        ),
    ];

    for (name, stmt) in statements {
        match db.execute_unprepared(&stmt).await {
            Ok(_) => info!("Ensured index {} exists", name),
            Err(e) => tracing::warn!("Failed to create index {}: {}", name, e),
        }
    }

    Ok(())
}
