use std::{env::current_dir, fs::create_dir_all};

use cosmwasm_schema::{export_schema, remove_schemas, schema_for};

use fair_funding::auction_house::{Config, ExecuteMsg, InstantiateMsg, OwnershipTransferResponse, QueryMsg};
use fair_funding::types::Epoch;

fn main() {
    let mut out_dir = current_dir().unwrap();
    out_dir.push("schema");
    create_dir_all(&out_dir).unwrap();
    remove_schemas(&out_dir).unwrap();

    export_schema(&schema_for!(InstantiateMsg), &out_dir);
    export_schema(&schema_for!(ExecuteMsg), &out_dir);
    export_schema(&schema_for!(QueryMsg), &out_dir);
    export_schema(&schema_for!(Config), &out_dir);
    export_schema(&schema_for!(Epoch), &out_dir);
    export_schema(&schema_for!(OwnershipTransferResponse), &out_dir);
}
