//! Utilities used in the tx module.

// External uses.
use num::{BigUint, Zero};

// Workspace uses.
use zklink_basic_types::ZkLinkAddress;
use zklink_utils::format_units;

/// Construct the first part of the message that should be signed by the
/// Ethereum key. The pattern is as follows:
///
/// [{Transfer/Withdraw} {amount} {token} to: {to_address}]
/// [Fee: {fee} {token}]
///
/// Note that both lines are optional.
pub fn ethereum_sign_message_part(
    transaction: &str,
    token_symbol: &str,
    decimals: u8,
    amount: &BigUint,
    fee: &BigUint,
    to: &ZkLinkAddress,
) -> String {
    let mut message = if !amount.is_zero() {
        format!(
            "{transaction} {amount} {token} to: {to}",
            transaction = transaction,
            amount = format_units(amount, decimals),
            token = token_symbol,
            to = to
        )
    } else {
        String::new()
    };
    if !fee.is_zero() {
        if !message.is_empty() {
            message.push('\n');
        }
        message.push_str(
            format!(
                "Fee: {fee} {token}",
                fee = format_units(fee, decimals),
                token = token_symbol
            )
            .as_str(),
        );
    }
    message
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_amount_and_fee_produce_empty_message() {
        let to: ZkLinkAddress = vec![1u8; 20].into();
        let message =
            ethereum_sign_message_part("Transfer", "ETH", 18, &BigUint::zero(), &BigUint::zero(), &to);
        assert!(message.is_empty());
    }

    #[test]
    fn fee_only_message_has_single_line() {
        let to: ZkLinkAddress = vec![1u8; 20].into();
        let message = ethereum_sign_message_part(
            "Withdraw",
            "ETH",
            18,
            &BigUint::zero(),
            &BigUint::from(100u32),
            &to,
        );
        assert_eq!(message, "Fee: 0.0000000000000001 ETH");
    }
}
