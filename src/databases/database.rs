
use tokio::sync::Mutex;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::databases::wrappers::StoreData;
use crate::utility::*;


#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write store: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize store: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// JSON document mirrored to disk after every mutation. Cloning hands out
/// another handle to the same document.
#[derive(Clone)]
pub struct Store {
    path: Arc<PathBuf>,
    data: Arc<Mutex<StoreData>>,
}

impl Store {

    pub async fn open(path: impl AsRef<Path>) -> Result<Store, StoreError> {
        let path = path.as_ref().to_path_buf();
        let data = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str::<StoreData>(&raw) {
                Ok(data) => data,
                Err(why) => {
                    Logger::err_long("Store is corrupt, starting from defaults", &why.to_string());
                    StoreData::default()
                }
            },
            Err(why) if why.kind() == ErrorKind::NotFound => {
                Logger::info_long("Creating store", &path.display().to_string());
                let data = StoreData::default();
                write_document(&path, &data).await?;
                data
            },
            Err(why) => return Err(why.into()),
        };

        #[cfg(feature = "debug")]
        Logger::info_long("Loaded store", &path.display().to_string());

        Ok(Store { path: Arc::new(path), data: Arc::new(Mutex::new(data)) })
    }

    pub async fn read<R>(&self, reader: impl FnOnce(&StoreData) -> R) -> R {
        let data = self.data.lock().await;
        reader(&data)
    }

    /// Applies the mutation to a copy and persists it before returning. The
    /// copy only replaces the live document once it is on disk, so a failed
    /// write leaves memory as it was. The lock is held across the write so
    /// documents hit the disk in order.
    pub async fn mutate<R>(&self, mutation: impl FnOnce(&mut StoreData) -> R) -> Result<R, StoreError> {
        let mut data = self.data.lock().await;
        let mut draft = data.clone();
        let result = mutation(&mut draft);
        write_document(&self.path, &draft).await?;
        *data = draft;
        Ok(result)
    }

    pub async fn snapshot(&self) -> StoreData {
        self.data.lock().await.clone()
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

}

async fn write_document(path: &Path, data: &StoreData) -> Result<(), StoreError> {
    let raw = serde_json::to_string_pretty(data)?;
    tokio::fs::write(path, raw).await?;
    Ok(())
}
