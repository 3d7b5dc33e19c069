use std::time::Duration;

use dynamap_core::{Backend, DynamapError, Result, TableDescription};

/// Polls `DescribeTable` until the table reports `ACTIVE`.
///
/// Sleeps `interval` between polls and gives up after `max_polls` with
/// [`DynamapError::TableActivationTimeout`].
pub async fn wait_until_active<B>(
    backend: &B,
    table_name: &str,
    interval: Duration,
    max_polls: u32,
) -> Result<TableDescription>
where
    B: Backend + ?Sized,
{
    for poll in 0..max_polls {
        let description = backend.describe_table(table_name).await?.table;
        if description.is_active() {
            tracing::debug!(table = %table_name, polls = poll + 1, "Table is active");
            return Ok(description);
        }

        tracing::debug!(
            table = %table_name,
            status = ?description.table_status,
            "Waiting for table to become active"
        );
        if poll + 1 < max_polls {
            tokio::time::sleep(interval).await;
        }
    }

    Err(DynamapError::TableActivationTimeout {
        table: table_name.to_string(),
    })
}

#[cfg(all(test, feature = "memory"))]
mod tests {
    use std::sync::Arc;

    use dynamap_core::TableRegistry;

    use super::*;
    use crate::memory::MemoryBackend;

    dynamap_core::record! {
        #[derive(Debug, Default)]
        struct Page {
            url: String as "URL" => hash,
        }
    }

    #[tokio::test]
    async fn test_memory_table_is_active_on_first_poll() {
        let registry = Arc::new(TableRegistry::new());
        let schema = registry.register::<Page>("fetch").unwrap();
        let backend = MemoryBackend::new(registry);
        backend.create_table(&schema).await.unwrap();

        let description = wait_until_active(&backend, "fetch", Duration::from_secs(1), 1)
            .await
            .unwrap();

        assert_eq!(description.table_name, "fetch");
    }

    #[tokio::test]
    async fn test_missing_table_propagates_error() {
        let backend = MemoryBackend::new(Arc::new(TableRegistry::new()));
        let result = wait_until_active(&backend, "missing", Duration::from_millis(1), 3).await;
        assert!(matches!(result, Err(DynamapError::UnknownTable(_))));
    }
}
