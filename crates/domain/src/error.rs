#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error("not found")]
    NotFound,
    #[error("conflict")]
    Conflict,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<ReadError> for CreateError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::NotFound => CreateError::NotFound,
            ReadError::Storage(storage) => CreateError::Storage(storage),
            ReadError::Other(other) => CreateError::Other(other),
        }
    }
}

impl From<UpdateError> for CreateError {
    fn from(value: UpdateError) -> Self {
        match value {
            UpdateError::NotFound => CreateError::NotFound,
            UpdateError::Conflict => CreateError::Conflict,
            UpdateError::Storage(storage) => CreateError::Storage(storage),
            UpdateError::Other(other) => CreateError::Other(other),
        }
    }
}

impl From<SyncError> for CreateError {
    fn from(value: SyncError) -> Self {
        match value {
            SyncError::NotFound => CreateError::NotFound,
            SyncError::Conflict => CreateError::Conflict,
            SyncError::Storage(storage) => CreateError::Storage(storage),
            SyncError::Other(other) => CreateError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    #[error("not found")]
    NotFound,
    #[error("conflict")]
    Conflict,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum SyncError {
    #[error("not found")]
    NotFound,
    #[error("conflict")]
    Conflict,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<ReadError> for SyncError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::NotFound => SyncError::NotFound,
            ReadError::Storage(storage) => SyncError::Storage(storage),
            ReadError::Other(other) => SyncError::Other(other),
        }
    }
}

impl From<CreateError> for SyncError {
    fn from(value: CreateError) -> Self {
        match value {
            CreateError::NotFound => SyncError::NotFound,
            CreateError::Conflict => SyncError::Conflict,
            CreateError::Validation(validation) => SyncError::Other(validation.into()),
            CreateError::Storage(storage) => SyncError::Storage(storage),
            CreateError::Other(other) => SyncError::Other(other),
        }
    }
}

impl From<UpdateError> for SyncError {
    fn from(value: UpdateError) -> Self {
        match value {
            UpdateError::NotFound => SyncError::NotFound,
            UpdateError::Conflict => SyncError::Conflict,
            UpdateError::Storage(storage) => SyncError::Storage(storage),
            UpdateError::Other(other) => SyncError::Other(other),
        }
    }
}

impl From<DeleteError> for SyncError {
    fn from(value: DeleteError) -> Self {
        match value {
            DeleteError::Storage(storage) => SyncError::Storage(storage),
            DeleteError::Other(other) => SyncError::Other(other),
        }
    }
}

impl From<SyncError> for ReadError {
    fn from(value: SyncError) -> Self {
        match value {
            SyncError::NotFound => ReadError::NotFound,
            SyncError::Conflict => ReadError::Other("conflict".into()),
            SyncError::Storage(storage) => ReadError::Storage(storage),
            SyncError::Other(other) => ReadError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("conflicting {0}")]
    Conflict(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("no connection")]
    NoConnection,
    #[error("periodization is not provisioned, apply the pending migration ({0})")]
    MissingRelation(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl StorageError {
    /// Classifies a raw store error message. Messages that indicate a missing
    /// periodization relation are translated into `MissingRelation`, which is
    /// expected during incremental rollout before the migration has been
    /// applied; everything else passes through untranslated.
    #[must_use]
    pub fn from_store_message(message: &str) -> Self {
        const RELATION_ERRORS: [&str; 3] = ["does not exist", "no such table", "42P01"];
        const PERIODIZATION_RELATIONS: [&str; 2] = ["mesocycles", "mesocycle_sessions"];

        if RELATION_ERRORS.iter().any(|e| message.contains(e))
            && PERIODIZATION_RELATIONS.iter().any(|r| message.contains(r))
        {
            return StorageError::MissingRelation(message.to_string());
        }

        StorageError::Other(message.to_string().into())
    }
}
