use election_core::{
    Election, ElectionCatalogue, ElectionConfig, ElectionStatus, Input, Output, SignatureVerifier,
    TxId, ValidatorSet, Vote, VALIDATOR_SET_UPDATE_ELECTION,
};
use election_crypto::PublicKey;
use election_driver::{ApprovalDriver, InMemoryChain};

/// Stands in for real signature checking: these tests exercise admission
/// and conclusion logic, not the base transaction model's signing
/// scheme, so every input is accepted regardless of its (empty)
/// signature list.
struct AllowAllVerifier;

impl SignatureVerifier for AllowAllVerifier {
    fn inputs_valid(&self, _message: &[u8], _inputs: &[Input]) -> bool {
        true
    }
}

fn pk(byte: u8) -> PublicKey {
    let sk = ed25519_dalek::SigningKey::from_bytes(&[byte; 32]);
    PublicKey::from_bytes(sk.verifying_key().to_bytes()).unwrap()
}

fn three_validators() -> ValidatorSet {
    let mut set = ValidatorSet::new();
    set.insert(pk(1), 5);
    set.insert(pk(2), 5);
    set.insert(pk(3), 5);
    set
}

fn propose(chain: &mut InMemoryChain, validators: &ValidatorSet, height: u64) -> Election {
    let catalogue = ElectionCatalogue::with_builtins();
    let asset_data = serde_json::json!({
        "validators": [{"public_key": pk(9).to_base58(), "power": 15}],
    });
    let election = Election::generate(
        pk(1),
        validators,
        VALIDATOR_SET_UPDATE_ELECTION,
        asset_data,
        None,
        &catalogue,
    )
    .unwrap()
    .validate(&*chain, &[], &AllowAllVerifier, &catalogue)
    .unwrap();
    chain.commit_election(height, election.clone());
    election
}

fn vote_for(election: &Election, voter: PublicKey, power: u64) -> Vote {
    let election_pk = election.derive_election_pk().unwrap();
    Vote {
        id: TxId::from_hex(format!("vote-{}", voter.to_hex())),
        inputs: vec![],
        outputs: vec![Output {
            public_keys: vec![election_pk],
            amount: power,
        }],
        asset_id: election.id.clone(),
        metadata: None,
    }
}

/// S1: total voting power 15, supermajority threshold is 10. A block
/// carrying exactly 10 voting power of votes crosses the line.
#[test]
fn election_concludes_exactly_at_supermajority() {
    let validators = three_validators();
    let mut chain = InMemoryChain::new(validators.clone());
    let election = propose(&mut chain, &validators, 1);
    chain.advance_height(1);

    let votes = vec![
        vote_for(&election, pk(1), 5),
        vote_for(&election, pk(2), 5),
    ];

    let catalogue = ElectionCatalogue::with_builtins();
    let driver = ApprovalDriver::new(ElectionConfig::default());
    let updates = driver.process_block(&mut chain, &catalogue, 2, &votes).unwrap();

    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].validators.len(), 1);
    assert_eq!(election.get_status(&chain).unwrap(), ElectionStatus::Concluded);
}

/// A block whose votes fall short of the supermajority leaves the
/// election ongoing and produces no validator update.
#[test]
fn election_stays_ongoing_below_threshold() {
    let validators = three_validators();
    let mut chain = InMemoryChain::new(validators.clone());
    let election = propose(&mut chain, &validators, 1);
    chain.advance_height(1);

    let votes = vec![vote_for(&election, pk(1), 5)];

    let catalogue = ElectionCatalogue::with_builtins();
    let driver = ApprovalDriver::new(ElectionConfig::default());
    let updates = driver.process_block(&mut chain, &catalogue, 2, &votes).unwrap();

    assert!(updates.is_empty());
    assert_eq!(election.get_status(&chain).unwrap(), ElectionStatus::Ongoing);
}

/// Votes committed in an earlier block still count toward conclusion in
/// a later block, combined with that block's fresh votes.
#[test]
fn votes_across_multiple_blocks_accumulate() {
    let validators = three_validators();
    let mut chain = InMemoryChain::new(validators.clone());
    let election = propose(&mut chain, &validators, 1);
    chain.advance_height(1);

    chain.commit_vote(&election.id, vote_for(&election, pk(1), 5));
    chain.advance_height(2);

    let catalogue = ElectionCatalogue::with_builtins();
    let driver = ApprovalDriver::new(ElectionConfig::default());

    let first_pass = driver.process_block(&mut chain, &catalogue, 2, &[]).unwrap();
    assert!(first_pass.is_empty());

    let second_block_votes = vec![vote_for(&election, pk(2), 5)];
    let updates = driver
        .process_block(&mut chain, &catalogue, 3, &second_block_votes)
        .unwrap();

    assert_eq!(updates.len(), 1);
}

/// Once concluded, an election is never reprocessed even if more votes
/// for it show up in a later block.
#[test]
fn concluded_election_is_not_reprocessed() {
    let validators = three_validators();
    let mut chain = InMemoryChain::new(validators.clone());
    let election = propose(&mut chain, &validators, 1);
    chain.advance_height(1);

    let catalogue = ElectionCatalogue::with_builtins();
    let driver = ApprovalDriver::new(ElectionConfig::default());

    let votes = vec![vote_for(&election, pk(1), 5), vote_for(&election, pk(2), 5)];
    let first = driver.process_block(&mut chain, &catalogue, 2, &votes).unwrap();
    assert_eq!(first.len(), 1);

    let late_votes = vec![vote_for(&election, pk(3), 5)];
    let second = driver.process_block(&mut chain, &catalogue, 3, &late_votes).unwrap();
    assert!(second.is_empty());
}

/// S5: a validator-set change committed after an election was accepted
/// kills it outright — it's reported `Inconclusive`, and no amount of
/// votes (even ones that would otherwise cross the supermajority) can
/// make the driver approve it.
#[test]
fn validator_set_change_kills_election() {
    let validators = three_validators();
    let mut chain = InMemoryChain::new(validators.clone());
    let election = propose(&mut chain, &validators, 1);
    chain.advance_height(1);

    let mut changed = three_validators();
    changed.insert(pk(4), 5);
    chain.apply_validator_change(2, changed);

    assert_eq!(
        election.get_status(&chain).unwrap(),
        ElectionStatus::Inconclusive
    );

    let votes = vec![vote_for(&election, pk(1), 5), vote_for(&election, pk(2), 5)];
    let catalogue = ElectionCatalogue::with_builtins();
    let driver = ApprovalDriver::new(ElectionConfig::default());
    let updates = driver.process_block(&mut chain, &catalogue, 3, &votes).unwrap();

    assert!(updates.is_empty());
}

/// A proposer outside the validator set is rejected during validation,
/// before it ever reaches the driver.
#[test]
fn validate_rejects_unknown_proposer() {
    let validators = three_validators();
    let chain = InMemoryChain::new(validators.clone());
    let catalogue = ElectionCatalogue::with_builtins();
    let asset_data = serde_json::json!({
        "validators": [{"public_key": pk(9).to_base58(), "power": 15}],
    });
    let election = Election::generate(
        pk(99),
        &validators,
        VALIDATOR_SET_UPDATE_ELECTION,
        asset_data,
        None,
        &catalogue,
    )
    .unwrap();

    let err = election.validate(&chain, &[], &AllowAllVerifier, &catalogue).unwrap_err();
    assert!(matches!(err, election_core::ElectionError::InvalidProposer));
}

/// An election id already committed cannot be admitted a second time.
#[test]
fn validate_rejects_duplicate_election() {
    let validators = three_validators();
    let mut chain = InMemoryChain::new(validators.clone());
    let election = propose(&mut chain, &validators, 1);
    let catalogue = ElectionCatalogue::with_builtins();

    let err = election
        .clone()
        .validate(&chain, &[], &AllowAllVerifier, &catalogue)
        .unwrap_err();
    assert!(matches!(err, election_core::ElectionError::DuplicateTransaction(_)));
}
