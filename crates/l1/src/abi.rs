use alloy_sol_types::sol;

sol! {
    /// The rollup contract, anchoring the validator set and the L2 chain on L1.
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    interface IRollup {
        // *********************ERRORS*********************
        error Rollup__NothingToPrune();

        // *********************MUTATING*********************
        function initiateWithdraw(address attester, address recipient) external returns (bool);
        function prune() external;

        // *********************VIEWS*********************
        function getPendingBlockNumber() external view returns (uint256);
        function getProvenBlockNumber() external view returns (uint256);
        function getAttesters() external view returns (address[] memory);
        function getCurrentEpochCommittee() external view returns (address[] memory);
        function archive() external view returns (bytes32);
        function getCurrentEpoch() external view returns (uint256);
        function getCurrentSlot() external view returns (uint256);
        function getCurrentProposer() external view returns (address);
        function getProposerAt(uint256 ts) external view returns (address);
        function getEpochDuration() external view returns (uint256);
        function getSlotDuration() external view returns (uint256);
        function getGenesisTime() external view returns (uint256);
        function getTimestampForSlot(uint256 slotNumber) external view returns (uint256);
    }

    /// The handler through which validators are admitted to the rollup's staking set.
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    interface IStakingAssetHandler {
        function addValidator(address attester, address proposer) external;
        function getRollup() external view returns (address);
    }
}
