use std::{env::current_dir, fs::create_dir_all};

use cosmwasm_schema::{export_schema, remove_schemas, schema_for};

use fair_funding::types::{Migration, Pool, Position};
use fair_funding::vault::{
    Config, ExecuteMsg, InstantiateMsg, MintableAmountResponse, OwnershipTransfersResponse, QueryMsg,
};

fn main() {
    let mut out_dir = current_dir().unwrap();
    out_dir.push("schema");
    create_dir_all(&out_dir).unwrap();
    remove_schemas(&out_dir).unwrap();

    export_schema(&schema_for!(InstantiateMsg), &out_dir);
    export_schema(&schema_for!(ExecuteMsg), &out_dir);
    export_schema(&schema_for!(QueryMsg), &out_dir);
    export_schema(&schema_for!(Config), &out_dir);
    export_schema(&schema_for!(Position), &out_dir);
    export_schema(&schema_for!(Pool), &out_dir);
    export_schema(&schema_for!(Migration), &out_dir);
    export_schema(&schema_for!(MintableAmountResponse), &out_dir);
    export_schema(&schema_for!(OwnershipTransfersResponse), &out_dir);
}
