//! CLI tool for deploying and operating the governance contracts.

use bastion_contracts::acl::AccessControl;
use bastion_contracts::liquidation::LiquidationGatekeeper;
use bastion_contracts::timelock::ControllerTimelock;
use odra::host::{HostEnv, NoArgs};
use odra::prelude::{Address, Addressable};
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};

/// Default delay of every policy: one day in block-time units
const DEFAULT_POLICY_DELAY: u64 = 24 * 60 * 60 * 1000;

/// Deploys the role registry; the deployer becomes configurator.
pub struct AccessControlDeployScript;

impl DeployScript for AccessControlDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        let _acl = AccessControl::load_or_deploy(
            &env,
            NoArgs,
            container,
            200_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the controller timelock.
/// Requires the role registry; the deployer becomes veto admin and admin of every policy.
pub struct ControllerTimelockDeployScript;

impl DeployScript for ControllerTimelockDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use bastion_contracts::timelock::controller::ControllerTimelockInitArgs;

        let acl = container.contract_ref::<AccessControl>(env)?;
        let _timelock = ControllerTimelock::load_or_deploy(
            &env,
            ControllerTimelockInitArgs {
                acl: acl.address().clone(),
                veto_admin: env.caller(),
                delay: DEFAULT_POLICY_DELAY,
            },
            container,
            600_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the liquidation gatekeeper.
/// Requires the role registry.
pub struct LiquidationGatekeeperDeployScript;

impl DeployScript for LiquidationGatekeeperDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use bastion_contracts::liquidation::gatekeeper::LiquidationGatekeeperInitArgs;

        let acl = container.contract_ref::<AccessControl>(env)?;
        let _gatekeeper = LiquidationGatekeeper::load_or_deploy(
            &env,
            LiquidationGatekeeperInitArgs {
                acl: acl.address().clone(),
            },
            container,
            400_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the full governance layer (registry, timelock, gatekeeper).
pub struct GovernanceDeployScript;

impl DeployScript for GovernanceDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        AccessControlDeployScript.deploy(env, container)?;
        ControllerTimelockDeployScript.deploy(env, container)?;
        LiquidationGatekeeperDeployScript.deploy(env, container)?;

        Ok(())
    }
}

/// Scenario to add or remove a trusted liquidator.
pub struct SetWhitelistedScenario;

impl Scenario for SetWhitelistedScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "account",
                "Liquidator account",
                NamedCLType::Key,
            ),
            CommandArg::new(
                "whitelisted",
                "Whether the account may liquidate",
                NamedCLType::Bool,
            ),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut gatekeeper = container.contract_ref::<LiquidationGatekeeper>(env)?;
        let account = args.get_single::<Address>("account")?;
        let whitelisted = args.get_single::<bool>("whitelisted")?;

        env.set_gas(50_000_000_000);
        gatekeeper.try_set_whitelisted(account, whitelisted)?;

        println!("Whitelist status of {:?} set to {}", account, whitelisted);
        Ok(())
    }
}

impl ScenarioMetadata for SetWhitelistedScenario {
    const NAME: &'static str = "set-whitelisted";
    const DESCRIPTION: &'static str = "Adds or removes a liquidator from the gatekeeper whitelist";
}

/// Scenario to open liquidations to everyone for a while.
pub struct AllowPublicLiquidationsScenario;

impl Scenario for AllowPublicLiquidationsScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![CommandArg::new(
            "duration",
            "Length of the public window in milliseconds",
            NamedCLType::U64,
        )]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut gatekeeper = container.contract_ref::<LiquidationGatekeeper>(env)?;
        let duration = args.get_single::<u64>("duration")?;

        env.set_gas(50_000_000_000);
        gatekeeper.try_allow_temporary_public_liquidations(duration)?;

        println!(
            "Public liquidations allowed until {}",
            gatekeeper.public_liquidations_allowed_until()
        );
        Ok(())
    }
}

impl ScenarioMetadata for AllowPublicLiquidationsScenario {
    const NAME: &'static str = "allow-public-liquidations";
    const DESCRIPTION: &'static str = "Temporarily lets anyone liquidate through the gatekeeper";
}

/// Scenario to apply a queued parameter change.
pub struct ExecuteTransactionScenario;

impl Scenario for ExecuteTransactionScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![CommandArg::new(
            "tx_hash",
            "Hash returned when the change was queued",
            NamedCLType::ByteArray(32),
        )]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut timelock = container.contract_ref::<ControllerTimelock>(env)?;
        let tx_hash = args.get_single::<[u8; 32]>("tx_hash")?;

        env.set_gas(300_000_000_000);
        timelock.try_execute_transaction(tx_hash)?;

        println!("Transaction executed successfully!");
        Ok(())
    }
}

impl ScenarioMetadata for ExecuteTransactionScenario {
    const NAME: &'static str = "execute-transaction";
    const DESCRIPTION: &'static str = "Executes a queued controller timelock transaction";
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for the governance and liquidation contracts")
        // Deploy scripts
        .deploy(AccessControlDeployScript)
        .deploy(ControllerTimelockDeployScript)
        .deploy(LiquidationGatekeeperDeployScript)
        .deploy(GovernanceDeployScript)
        // Contract references
        .contract::<AccessControl>()
        .contract::<ControllerTimelock>()
        .contract::<LiquidationGatekeeper>()
        // Scenarios
        .scenario(SetWhitelistedScenario)
        .scenario(AllowPublicLiquidationsScenario)
        .scenario(ExecuteTransactionScenario)
        .build()
        .run();
}
