//! Every supported sentence kind parses its canonical example and
//! survives its validity predicate.

use pretty_assertions::assert_eq;

use neom9n::{ParseResult, SentenceType, parse_str};

#[test]
fn all_supported_messages_parse_and_validate() {
    let messages = [
        // DTM
        "$GPDTM,W84,,0.0,N,0.0,E,0.0,W84*6F",
        // GAQ
        "$GAGAQ,GBS*2B",
        // GBQ
        "$GBGBQ,DTM*20",
        // GBS
        "$GPGBS,235503.00,1.6,1.4,3.2,,,,,,*40",
        // GGA
        "$GPGGA,092725.00,4717.11399,N,00833.91590,E,1,08,1.01,499.6,M,48.0,M,,*5B",
        // GLL
        "$GPGLL,4717.11364,N,00833.91565,E,092321.00,A,A*60",
        // GLQ
        "$GLGLQ,GSV*3F",
        // GNQ
        "$GNGNQ,RMC*21",
        // GNS
        "$GNGNS,103600.01,5114.51176,N,00012.29380,W,ANNN,07,1.18,111.5,45.6,,,V*00",
        // GPQ
        "$GPGPQ,RMC*21",
        // GRS
        "$GNGRS,104148.00,1,2.6,2.2,-1.6,-1.1,-1.7,-1.5,5.8,1.7,,,,,1,1*52",
        // GSA
        "$GPGSA,A,3,23,29,07,08,09,18,26,28,,,,,1.94,1.18,1.54,1*10",
        // GST
        "$GPGST,082356.00,1.8,,,,1.7,1.3,2.2*7E",
        // GSV
        "$GPGSV,3,1,09,09,,,17,10,,,40,12,,,49,13,,,35,1*6F",
        // RLM
        "$GPRLM,4B00450000000000,084600.00,1,213E4*67",
        // RMC
        "$GPRMC,083559.00,A,4717.11437,N,00833.91522,E,0.004,77.52,091202,,,A,V*2D",
        // TXT
        "$GPTXT,01,01,02,u-blox ag - www.u-blox.com*50",
        // VLW
        "$GPVLW,,N,,N,15.8,N,1.2,N*65",
        // VTG
        "$GPVTG,77.52,T,,M,0.004,N,0.008,K,A*06",
        // ZDA
        "$GPZDA,082710.00,16,09,2002,00,00*64",
    ];

    let mut parsed_kinds: Vec<SentenceType> = Vec::new();
    for message in messages {
        let result = parse_str(message)
            .unwrap_or_else(|e| panic!("{} failed to parse: {}", message, e));
        assert!(result.is_valid(), "{} failed its validity check", message);
        parsed_kinds.push(result.sentence_type());
    }

    // One canonical message per kind, every kind covered.
    let mut expected: Vec<SentenceType> = SentenceType::ALL.to_vec();
    expected.sort_by_key(|kind| format!("{}", kind));
    let mut seen = parsed_kinds.clone();
    seen.sort_by_key(|kind| format!("{}", kind));
    seen.dedup();
    assert_eq!(seen, expected);
}

#[test]
fn mutated_messages_fail() {
    // Fixed-field and bounds mutations of otherwise canonical examples.
    let invalid = [
        // GGA altitude unit K instead of M
        "$GPGGA,092725.00,4717.11399,N,00833.91590,E,1,08,1.01,499.6,K,48.0,M,,*5D",
        // GLL hemisphere Q
        "$GPGLL,4717.11364,N,00833.91565,Q,092321.00,A,A*74",
        // RMC position mode N (no fix)
        "$GPRMC,083559.00,A,4717.11437,N,00833.91522,E,0.004,77.52,091202,,,N,V*22",
        // ZDA month 13
        "$GPZDA,082710.00,16,13,2002,00,00*6F",
    ];
    for message in invalid {
        let result = parse_str(message).unwrap();
        assert!(!result.is_valid(), "{} should be invalid", message);
    }

    // A dropped field violates the bounds before any parsing runs.
    assert!(matches!(
        parse_str("$GPZDA,082710.00,16,09,2002,00*48"),
        Err(neom9n::Error::FieldCount { .. })
    ));

    // Non-consuming numeric parse leaves the field absent.
    match parse_str("$GPZDA,082710.00,16,09,2OO2,00,00*64").unwrap() {
        ParseResult::ZDA(zda) => assert!(!zda.year.is_valid()),
        other => panic!("unexpected kind {:?}", other),
    }
}
