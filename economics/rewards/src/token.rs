use std::collections::HashMap;

use keepnet_keeps::BeneficiaryId;
use keepnet_schedule::TokenAmount;

/// Beneficiary balance book: the narrow stand-in for the token
/// transfer primitive the ledger credits payouts through.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct TokenLedger {
    balances: HashMap<BeneficiaryId, TokenAmount>,
    total_credited: TokenAmount,
}

impl TokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a beneficiary. Crediting zero is a no-op.
    pub fn credit(&mut self, beneficiary: BeneficiaryId, amount: TokenAmount) {
        if amount == 0 {
            return;
        }
        *self.balances.entry(beneficiary).or_insert(0) += amount;
        self.total_credited += amount;
    }

    pub fn balance_of(&self, beneficiary: &BeneficiaryId) -> TokenAmount {
        self.balances.get(beneficiary).copied().unwrap_or(0)
    }

    /// Sum of everything ever credited.
    pub fn total_credited(&self) -> TokenAmount {
        self.total_credited
    }

    pub fn account_count(&self) -> usize {
        self.balances.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beneficiary(n: u8) -> BeneficiaryId {
        let mut b = [0u8; 32];
        b[31] = n;
        b
    }

    #[test]
    fn credit_accumulates() {
        let mut token = TokenLedger::new();
        token.credit(beneficiary(1), 100);
        token.credit(beneficiary(1), 250);
        token.credit(beneficiary(2), 40);

        assert_eq!(token.balance_of(&beneficiary(1)), 350);
        assert_eq!(token.balance_of(&beneficiary(2)), 40);
        assert_eq!(token.total_credited(), 390);
        assert_eq!(token.account_count(), 2);
    }

    #[test]
    fn unknown_beneficiary_has_zero_balance() {
        let token = TokenLedger::new();
        assert_eq!(token.balance_of(&beneficiary(9)), 0);
    }

    #[test]
    fn zero_credit_creates_no_account() {
        let mut token = TokenLedger::new();
        token.credit(beneficiary(1), 0);
        assert_eq!(token.account_count(), 0);
        assert_eq!(token.total_credited(), 0);
    }
}
