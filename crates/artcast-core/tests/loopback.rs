use std::io::ErrorKind;
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use artcast_core::{Client, ClientConfig, ClientError, PACKET_LEN, Packet};

fn receiver() -> UdpSocket {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    socket
        .set_read_timeout(Some(Duration::from_secs(2)))
        .unwrap();
    socket
}

fn unused_port_addr() -> SocketAddr {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    socket.local_addr().unwrap()
}

fn recv_datagram(socket: &UdpSocket) -> Vec<u8> {
    let mut buf = [0u8; 1024];
    let (len, _) = socket.recv_from(&mut buf).unwrap();
    buf[..len].to_vec()
}

#[test]
fn send_delivers_full_artdmx_datagram() {
    let rx = receiver();
    let client = Client::new(rx.local_addr().unwrap()).unwrap();

    let mut packet = Packet::new(2, 9);
    for (i, slot) in packet.dmx_mut().iter_mut().enumerate() {
        *slot = (i % 256) as u8;
    }
    client.send(&mut packet).unwrap();

    let datagram = recv_datagram(&rx);
    assert_eq!(datagram.len(), PACKET_LEN);
    assert_eq!(&datagram[..8], b"Art-Net\0");
    assert_eq!(&datagram[8..12], &[0x00, 0x50, 0x00, 0x0e]);
    assert_eq!(datagram[12], 1);
    assert_eq!(datagram[13], 0);
    assert_eq!(datagram[14], 9);
    assert_eq!(datagram[15], 2);
    assert_eq!(&datagram[16..18], &[0x02, 0x00]);
    for (i, &value) in datagram[18..].iter().enumerate() {
        assert_eq!(value, (i % 256) as u8);
    }
    assert_eq!(datagram.as_slice(), packet.as_bytes().as_slice());

    client.close().unwrap();
}

#[test]
fn consecutive_sends_carry_increasing_sequence() {
    let rx = receiver();
    let client = Client::with_config(&ClientConfig::new(rx.local_addr().unwrap().to_string()))
        .unwrap();
    let mut packet = Packet::new(0, 0);

    for _ in 0..3 {
        client.send(&mut packet).unwrap();
    }

    let sequences: Vec<u8> = (0..3).map(|_| recv_datagram(&rx)[12]).collect();
    assert_eq!(sequences, vec![1, 2, 3]);
}

#[test]
fn payload_changes_between_sends_are_transmitted() {
    let rx = receiver();
    let client = Client::new(rx.local_addr().unwrap()).unwrap();
    let mut packet = Packet::new(0, 4);

    packet.set_channel(1, 100).unwrap();
    client.send(&mut packet).unwrap();
    packet.set_channel(1, 200).unwrap();
    client.send(&mut packet).unwrap();

    assert_eq!(recv_datagram(&rx)[18], 100);
    assert_eq!(recv_datagram(&rx)[18], 200);
}

#[test]
fn shared_client_sends_from_several_threads() {
    let rx = receiver();
    let client = Client::new(rx.local_addr().unwrap()).unwrap();

    std::thread::scope(|scope| {
        for universe in 0..4u8 {
            let client = &client;
            scope.spawn(move || {
                let mut packet = Packet::new(0, universe);
                for _ in 0..5 {
                    client.send(&mut packet).unwrap();
                }
            });
        }
    });

    for universe in 0..4u8 {
        assert_eq!(client.sequence(universe), 5);
    }
}

#[test]
fn closed_client_does_not_transmit() {
    let rx = receiver();
    rx.set_read_timeout(Some(Duration::from_millis(200))).unwrap();
    let client = Client::new(rx.local_addr().unwrap()).unwrap();
    client.close().unwrap();

    let mut packet = Packet::new(0, 0);
    let err = client.send(&mut packet).unwrap_err();
    assert!(matches!(err, ClientError::InvalidArgument(_)));

    let mut buf = [0u8; 1024];
    assert!(rx.recv_from(&mut buf).is_err());
}

#[test]
fn refused_destination_reports_transport_write() {
    let client = Client::new(unused_port_addr()).unwrap();
    let mut packet = Packet::new(0, 6);

    let mut attempts = 0u8;
    let err = loop {
        attempts += 1;
        match client.send(&mut packet) {
            Ok(()) if attempts < 20 => std::thread::sleep(Duration::from_millis(50)),
            Ok(()) => panic!("expected connection refused on a port with no listener"),
            Err(err) => break err,
        }
    };

    match err {
        ClientError::TransportWrite {
            destination,
            source,
        } => {
            assert_eq!(destination, client.destination());
            assert_eq!(source.kind(), ErrorKind::ConnectionRefused);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(client.sequence(6), attempts);
    assert_eq!(packet.sequence(), Some(attempts));
}

#[test]
fn close_ignores_error_left_by_earlier_datagram() {
    let client = Client::new(unused_port_addr()).unwrap();
    let mut packet = Packet::new(0, 0);

    client.send(&mut packet).unwrap();
    std::thread::sleep(Duration::from_millis(100));

    client.close().unwrap();
    assert!(client.is_closed());
}
