use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::accounts_model::{Account, NewAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::constants::DISPLAY_BALANCE_FALLBACK;
use crate::errors::{DatabaseError, Error, Result};

/// Service for managing accounts
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
}

impl AccountService {
    /// Creates a new AccountService instance
    pub fn new(repository: Arc<dyn AccountRepositoryTrait>) -> Self {
        Self { repository }
    }
}

/// Applies the display fallback: non-positive balances show as the fallback amount.
pub(crate) fn display_balance(balance: Decimal) -> Decimal {
    if balance > Decimal::ZERO {
        balance
    } else {
        DISPLAY_BALANCE_FALLBACK
    }
}

#[async_trait::async_trait]
impl AccountServiceTrait for AccountService {
    async fn create_account(&self, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;
        let new_account = new_account.normalized();

        if self.repository.find_by_email(&new_account.email)?.is_some() {
            return Err(Error::ConstraintViolation(format!(
                "An account with email {} already exists",
                new_account.email
            )));
        }

        let account = self
            .repository
            .create(new_account)
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent signup for the same email.
                Error::Database(DatabaseError::UniqueViolation(msg)) => {
                    Error::ConstraintViolation(msg)
                }
                other => other,
            })?;
        info!("Created account {}", account.id);
        Ok(account)
    }

    async fn delete_account(&self, account_id: &str) -> Result<()> {
        let deleted = self.repository.delete(account_id).await?;
        if deleted == 0 {
            return Err(Error::NotFound("Account".to_string()));
        }
        info!("Deleted account {}", account_id);
        Ok(())
    }

    fn get_account(&self, account_id: &str) -> Result<Account> {
        self.repository.get_by_id(account_id)
    }

    fn get_display_balance(&self, account_id: &str) -> Result<Decimal> {
        let account = self.repository.get_by_id(account_id)?;
        debug!("Stored balance for {}: {}", account_id, account.balance);
        Ok(display_balance(account.balance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockAccountRepository {
        accounts: Mutex<Vec<Account>>,
    }

    #[async_trait]
    impl AccountRepositoryTrait for MockAccountRepository {
        async fn create(&self, new_account: NewAccount) -> Result<Account> {
            let mut accounts = self.accounts.lock().unwrap();
            let account = Account {
                id: format!("acc-{}", accounts.len() + 1),
                name: new_account.name,
                email: new_account.email,
                is_demo: new_account.is_demo,
                ..Default::default()
            };
            accounts.push(account.clone());
            Ok(account)
        }

        async fn delete(&self, account_id: &str) -> Result<usize> {
            let mut accounts = self.accounts.lock().unwrap();
            let before = accounts.len();
            accounts.retain(|a| a.id != account_id);
            Ok(before - accounts.len())
        }

        fn get_by_id(&self, account_id: &str) -> Result<Account> {
            self.accounts
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.id == account_id)
                .cloned()
                .ok_or_else(|| Error::NotFound("Account".to_string()))
        }

        fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
            Ok(self
                .accounts
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.email == email)
                .cloned())
        }
    }

    impl MockAccountRepository {
        fn fund(&self, account_id: &str, amount: Decimal) {
            let mut accounts = self.accounts.lock().unwrap();
            let account = accounts.iter_mut().find(|a| a.id == account_id).unwrap();
            account.balance = amount;
        }
    }

    fn service() -> AccountService {
        AccountService::new(Arc::new(MockAccountRepository::default()))
    }

    fn signup(email: &str) -> NewAccount {
        NewAccount {
            name: "Test".to_string(),
            email: email.to_string(),
            is_demo: false,
        }
    }

    #[tokio::test]
    async fn create_account_stores_canonical_email() {
        let svc = service();
        let account = svc
            .create_account(signup(" Bob@Example.com"))
            .await
            .unwrap();
        assert_eq!(account.email, "bob@example.com");
        assert_eq!(account.balance, Decimal::ZERO);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_constraint_violation() {
        let svc = service();
        svc.create_account(signup("bob@example.com"))
            .await
            .unwrap();
        let err = svc
            .create_account(signup("BOB@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn display_balance_falls_back_when_not_positive() {
        let repo = Arc::new(MockAccountRepository::default());
        let svc = AccountService::new(repo.clone());
        let empty = svc
            .create_account(signup("empty@example.com"))
            .await
            .unwrap();
        let funded = svc
            .create_account(signup("funded@example.com"))
            .await
            .unwrap();
        repo.fund(&funded.id, dec!(42.50));
        assert_eq!(svc.get_display_balance(&empty.id).unwrap(), dec!(500));
        assert_eq!(svc.get_display_balance(&funded.id).unwrap(), dec!(42.50));
    }

    #[tokio::test]
    async fn deleting_unknown_account_is_not_found() {
        let err = service().delete_account("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
