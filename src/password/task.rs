//! 异步执行
//!
//! 哈希与校验会调用慢速的阻塞原语。本模块提供两种调用形式：
//!
//! - **Future**：`hash_async`、`verify_async` 等，原语在 Tokio 的阻塞线程池中执行
//! - **回调**：`hash_callback`、`verify_callback`，只是把 Future 派发到当前运行时，
//!   完成后调用一次回调
//!
//! 无论哪种形式，所有失败都通过 `Result` 交付：没有运行时、任务被取消、
//! 原语 panic 都不会越过这一层。
//!
//! ## 示例
//!
//! ```rust
//! use credrs::password::{Params, PasswordHasher, PolicyConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let hasher = PasswordHasher::with_policy(PolicyConfig::default().with_param("bcrypt", "cost", 4));
//!
//! let hash = hasher.hash_async("secret", None, Params::new()).await.unwrap();
//! assert!(hasher.verify_async("secret", &hash).await.unwrap());
//! # }
//! ```

use std::any::Any;
use std::future::Future;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::hasher::{PasswordHasher, VerifyOutcome};
use super::params::Params;
use crate::error::{Error, Result};

/// 在阻塞线程池中执行任务
///
/// 任务返回的错误原样交付；任务 panic 时转换为 `PrimitiveFailure`。
pub async fn offload<T, F>(job: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let handle = Handle::try_current()
        .map_err(|e| Error::internal(format!("no async runtime available: {}", e)))?;

    match handle.spawn_blocking(job).await {
        Ok(result) => result,
        Err(err) if err.is_panic() => Err(Error::primitive(format!(
            "hashing primitive panicked: {}",
            panic_message(err.into_panic().as_ref())
        ))),
        Err(err) => Err(Error::internal(format!("blocking task failed: {}", err))),
    }
}

/// 把 Future 派发到当前运行时，完成后调用一次回调
///
/// 没有运行时时立即以 `Error::Internal` 调用回调并返回 `None`。
pub fn complete_with<T, Fut, C>(future: Fut, callback: C) -> Option<JoinHandle<()>>
where
    T: Send + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
    C: FnOnce(Result<T>) + Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => Some(handle.spawn(async move { callback(future.await) })),
        Err(e) => {
            callback(Err(Error::internal(format!(
                "no async runtime available: {}",
                e
            ))));
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

impl PasswordHasher {
    /// [`hash_with`](Self::hash_with) 的异步版本
    pub async fn hash_async(
        &self,
        password: impl Into<String>,
        algorithm: Option<&str>,
        options: Params,
    ) -> Result<String> {
        let this = self.clone();
        let password = password.into();
        let algorithm = algorithm.map(str::to_owned);
        offload(move || this.hash_with(&password, algorithm.as_deref(), &options)).await
    }

    /// [`verify`](Self::verify) 的异步版本
    pub async fn verify_async(&self, password: impl Into<String>, hash: &str) -> Result<bool> {
        let this = self.clone();
        let password = password.into();
        let hash = hash.to_owned();
        offload(move || this.verify(&password, &hash)).await
    }

    /// [`verify_and_upgrade`](Self::verify_and_upgrade) 的异步版本
    pub async fn verify_and_upgrade_async(
        &self,
        password: impl Into<String>,
        hash: &str,
    ) -> Result<VerifyOutcome> {
        let this = self.clone();
        let password = password.into();
        let hash = hash.to_owned();
        offload(move || this.verify_and_upgrade(&password, &hash)).await
    }

    /// 回调形式的哈希
    ///
    /// 返回派发出的任务句柄；没有运行时时回调已被调用，返回 `None`。
    pub fn hash_callback<C>(
        &self,
        password: impl Into<String>,
        algorithm: Option<&str>,
        options: Params,
        callback: C,
    ) -> Option<JoinHandle<()>>
    where
        C: FnOnce(Result<String>) + Send + 'static,
    {
        let this = self.clone();
        let password = password.into();
        let name = algorithm.map(str::to_owned);
        complete_with(
            async move { this.hash_async(password, name.as_deref(), options).await },
            callback,
        )
    }

    /// 回调形式的校验
    pub fn verify_callback<C>(
        &self,
        password: impl Into<String>,
        hash: &str,
        callback: C,
    ) -> Option<JoinHandle<()>>
    where
        C: FnOnce(Result<bool>) + Send + 'static,
    {
        let this = self.clone();
        let password = password.into();
        let hash = hash.to_owned();
        complete_with(
            async move { this.verify_async(password, &hash).await },
            callback,
        )
    }
}
