use alloy::{
    contract::{CallBuilder, CallDecoder},
    eips::BlockId,
    network::Network,
    primitives::{Address, U256},
    providers::Provider,
};

/// Options for read-only calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallOptions {
    pub block: BlockId,
}

impl CallOptions {
    pub fn at_block(number: u64) -> Self {
        Self {
            block: BlockId::number(number),
        }
    }
}

/// Options for state-changing transactions. Unset fields are left to the provider's fillers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactOptions {
    pub from: Option<Address>,
    pub value: Option<U256>,
    pub gas_limit: Option<u64>,
    pub nonce: Option<u64>,
    pub max_fee_per_gas: Option<u128>,
    pub max_priority_fee_per_gas: Option<u128>,
}

impl TransactOptions {
    pub fn sender(from: Address) -> Self {
        Self {
            from: Some(from),
            ..Default::default()
        }
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    pub fn apply<P, D, N>(&self, mut call: CallBuilder<P, D, N>) -> CallBuilder<P, D, N>
    where
        P: Provider<N>,
        D: CallDecoder,
        N: Network,
    {
        if let Some(from) = self.from {
            call = call.from(from);
        }
        if let Some(value) = self.value {
            call = call.value(value);
        }
        if let Some(gas) = self.gas_limit {
            call = call.gas(gas);
        }
        if let Some(nonce) = self.nonce {
            call = call.nonce(nonce);
        }
        if let Some(max_fee) = self.max_fee_per_gas {
            call = call.max_fee_per_gas(max_fee);
        }
        if let Some(priority_fee) = self.max_priority_fee_per_gas {
            call = call.max_priority_fee_per_gas(priority_fee);
        }
        call
    }
}
